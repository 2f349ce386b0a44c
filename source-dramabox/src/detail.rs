use dracin_source_helper::{cover, tags, tags::Tag};
use dracin_source_prelude::serde_json::{self, Value};
use dracin_source_prelude::{
    build_resource_url, fetch_json, non_blank, DramaDetail, NativeId, SourceError,
    SourceErrorReason,
};

#[derive(Debug, serde::Deserialize)]
struct Envelope {
    data: Option<Data>,
}

#[derive(Debug, serde::Deserialize)]
struct Data {
    book: Option<Book>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Book {
    book_id: Option<NativeId>,
    book_name: Option<String>,
    cover: Option<String>,
    introduction: Option<String>,
    tags: Option<Vec<Tag>>,
    chapter_count: Option<u32>,
}

impl Book {
    fn try_into(self) -> Result<DramaDetail, SourceError> {
        let id = self
            .book_id
            .and_then(NativeId::usable)
            .ok_or_else(|| SourceError::new(super::ID, SourceErrorReason::EntryIdentityNotFound))?;
        let title = non_blank(self.book_name)
            .ok_or_else(|| SourceError::new(super::ID, SourceErrorReason::EntryTitleNotFound))?;
        Ok(DramaDetail {
            identity: super::ID.qualify(&id),
            source: super::ID,
            title,
            cover_url: cover::usable(self.cover.as_deref()),
            synopsis: non_blank(self.introduction),
            tags: tags::names(self.tags.iter().flatten()),
            episode_count: self.chapter_count,
        })
    }
}

pub(crate) async fn fetch(
    client: &reqwest::Client,
    base_url: &str,
    native: &str,
) -> Result<Value, SourceError> {
    let url = build_resource_url(super::ID, base_url, &["detail", native])?;
    fetch_json(client, super::ID, url).await
}

pub(crate) fn normalize(payload: Value) -> Result<DramaDetail, SourceError> {
    let envelope: Envelope = serde_json::from_value(payload).map_err(|err| {
        SourceError::new(
            super::ID,
            SourceErrorReason::UnexpectedPayload {
                cause: err.to_string(),
            },
        )
    })?;
    envelope
        .data
        .and_then(|data| data.book)
        .ok_or_else(|| {
            SourceError::new(
                super::ID,
                SourceErrorReason::UnexpectedPayload {
                    cause: "missing book".into(),
                },
            )
        })?
        .try_into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dracin_source_prelude::ErrorKind;

    #[tokio::test]
    async fn should_parse_detail() {
        let mut server = mockito::Server::new_async().await;

        let detail_page = server
            .mock("GET", "/api/dramabox/detail/41000102345")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("./detail.json"))
            .create_async()
            .await;

        let payload = fetch(&reqwest::Client::new(), server.url().as_str(), "41000102345")
            .await
            .unwrap();
        let detail = normalize(payload).unwrap();
        assert_eq!(detail.identity, "dramabox:41000102345");
        assert_eq!(detail.title, "Love Story in the Rain");
        assert_eq!(
            detail.cover_url.as_deref(),
            Some("https://wsrv.nl/?url=https%3A%2F%2Fnchapter.example.com%2Fcover%2F41000102345.heic&output=jpg")
        );
        // the detail page lists every tag
        assert_eq!(detail.tags.len(), 5);
        assert_eq!(detail.episode_count, Some(80));

        detail_page.assert_async().await;
    }

    #[test]
    fn should_reject_missing_book() {
        let err = normalize(serde_json::json!({"data": {"recommends": []}})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamFormat);
    }

    #[test]
    fn should_reject_untitled_book() {
        let err = normalize(serde_json::json!({"data": {"book": {"bookId": "1"}}})).unwrap_err();
        assert_eq!(err.reason, SourceErrorReason::EntryTitleNotFound);
    }
}
