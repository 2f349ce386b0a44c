use dracin_source_helper::{cover, tags, tags::Tag};
use dracin_source_prelude::serde_json::{self, Value};
use dracin_source_prelude::{
    build_url, fetch_json, non_blank, Badge, NativeId, NormalizedResult, SearchResult,
    SourceError, SourceErrorReason,
};

#[derive(Debug, serde::Deserialize)]
struct Corner {
    name: Option<String>,
    color: Option<String>,
}

impl Corner {
    fn into_badge(self) -> Option<Badge> {
        non_blank(self.name).map(|text| Badge {
            text,
            color: non_blank(self.color),
        })
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Entry {
    book_id: Option<NativeId>,
    book_name: Option<String>,
    cover_wap: Option<String>,
    introduction: Option<String>,
    tags: Option<Vec<Tag>>,
    corner: Option<Corner>,
}

impl Entry {
    pub(crate) fn try_into(self) -> Result<NormalizedResult, SourceError> {
        let id = self
            .book_id
            .and_then(NativeId::usable)
            .ok_or_else(|| SourceError::new(super::ID, SourceErrorReason::EntryIdentityNotFound))?;
        let title = non_blank(self.book_name)
            .ok_or_else(|| SourceError::new(super::ID, SourceErrorReason::EntryTitleNotFound))?;

        let mut entry = NormalizedResult::new(super::ID, &id, title)
            .with_cover(cover::usable(self.cover_wap.as_deref()))?;
        entry.synopsis = non_blank(self.introduction);
        entry.tags = tags::collect(self.tags.iter().flatten());
        entry.badge = self.corner.and_then(Corner::into_badge);
        Ok(entry)
    }
}

pub(crate) async fn fetch(
    client: &reqwest::Client,
    base_url: &str,
    query: &str,
) -> Result<Value, SourceError> {
    let url = build_url(super::ID, base_url, "/search", &[("query", query)])?;
    fetch_json(client, super::ID, url).await
}

pub(crate) fn normalize(payload: Value) -> Result<SearchResult, SourceError> {
    let records: Option<Vec<Value>> = serde_json::from_value(payload).map_err(|err| {
        SourceError::new(
            super::ID,
            SourceErrorReason::UnexpectedPayload {
                cause: err.to_string(),
            },
        )
    })?;
    Ok(SearchResult::collect(
        super::ID,
        records.unwrap_or_default(),
        Entry::try_into,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_parse_result() {
        let mut server = mockito::Server::new_async().await;

        let search_page = server
            .mock("GET", "/api/dramabox/search?query=love+story")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("./search.json"))
            .create_async()
            .await;

        let payload = fetch(&reqwest::Client::new(), server.url().as_str(), "love story")
            .await
            .unwrap();
        let results = normalize(payload).unwrap();
        println!("results: {results:#?}");
        assert_eq!(results.entries.len(), 3);
        assert_eq!(results.errors.len(), 1);
        assert_eq!(
            results.errors[0].reason,
            SourceErrorReason::EntryIdentityNotFound
        );

        assert_eq!(results.entries[0].title, "Love Story in the Rain");
        assert_eq!(results.entries[0].tags, vec!["Romance", "CEO", "Sweet"]);
        assert_eq!(
            results.entries[0].badge,
            Some(Badge {
                text: "Exclusive".into(),
                color: Some("#F54E96".into()),
            })
        );
        // no cover, the record is kept for a placeholder
        assert_eq!(results.entries[1].identity, "dramabox:41000102346");
        assert_eq!(results.entries[1].cover_url, None);
        assert_eq!(results.entries[1].badge, None);
        assert_eq!(results.entries[2].tags, Vec::<String>::new());

        search_page.assert_async().await;
    }

    #[test]
    fn should_treat_null_as_empty() {
        assert!(normalize(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn should_reject_wrapped_payload() {
        let err = normalize(serde_json::json!({"data": []})).unwrap_err();
        assert!(matches!(
            err.reason,
            SourceErrorReason::UnexpectedPayload { .. }
        ));
    }
}
