use dracin_source_helper::{cover, tags, tags::Tag};
use dracin_source_prelude::serde_json::{self, Value};
use dracin_source_prelude::{
    build_url, fetch_json, non_blank, NativeId, NormalizedResult, SearchResult, SourceError,
    SourceErrorReason,
};

#[derive(Debug, serde::Deserialize)]
struct Envelope {
    data: Option<Vec<Value>>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct Entry {
    book_id: Option<NativeId>,
    book_title: Option<String>,
    book_pic: Option<String>,
    special_desc: Option<String>,
    theme: Option<Vec<Tag>>,
}

impl Entry {
    pub(crate) fn try_into(self) -> Result<NormalizedResult, SourceError> {
        let id = self
            .book_id
            .and_then(NativeId::usable)
            .ok_or_else(|| SourceError::new(super::ID, SourceErrorReason::EntryIdentityNotFound))?;
        let title = non_blank(self.book_title)
            .ok_or_else(|| SourceError::new(super::ID, SourceErrorReason::EntryTitleNotFound))?;

        let mut entry = NormalizedResult::new(super::ID, &id, title)
            .with_cover(cover::usable(self.book_pic.as_deref()))?;
        entry.synopsis = non_blank(self.special_desc);
        entry.tags = tags::collect(self.theme.iter().flatten());
        Ok(entry)
    }
}

pub(crate) async fn fetch(
    client: &reqwest::Client,
    base_url: &str,
    query: &str,
) -> Result<Value, SourceError> {
    let url = build_url(
        super::ID,
        base_url,
        "/search",
        &[("query", query), ("page", "1")],
    )?;
    fetch_json(client, super::ID, url).await
}

pub(crate) fn normalize(payload: Value) -> Result<SearchResult, SourceError> {
    let envelope: Envelope = serde_json::from_value(payload).map_err(|err| {
        SourceError::new(
            super::ID,
            SourceErrorReason::UnexpectedPayload {
                cause: err.to_string(),
            },
        )
    })?;
    Ok(SearchResult::collect(
        super::ID,
        envelope.data.unwrap_or_default(),
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
            .mock("GET", "/api/reelshort/search?query=lovestory&page=1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("./search.json"))
            .create_async()
            .await;

        let payload = fetch(&reqwest::Client::new(), server.url().as_str(), "lovestory")
            .await
            .unwrap();
        let results = normalize(payload).unwrap();
        println!("results: {results:#?}");
        assert_eq!(results.entries.len(), 3);
        assert_eq!(results.errors.len(), 2);

        assert_eq!(results.entries[0].identity, "reelshort:42");
        assert_eq!(results.entries[0].title, "Lovestory: The Billionaire's Return");
        assert_eq!(
            results.entries[0].synopsis.as_deref(),
            Some("He came back for revenge and found her instead.")
        );
        assert_eq!(results.entries[0].tags, vec!["Billionaire", "Revenge"]);
        // string keys are accepted as well
        assert_eq!(results.entries[1].identity, "reelshort:643f1a");
        assert_eq!(results.entries[2].cover_url, None);

        search_page.assert_async().await;
    }

    #[test]
    fn should_skip_untitled_records() {
        let payload = serde_json::json!({
            "data": [
                {"book_id": 1, "book_title": "   "},
                {"book_id": 2, "book_title": "Kept"}
            ]
        });
        let results = normalize(payload).unwrap();
        assert_eq!(results.entries.len(), 1);
        assert_eq!(
            results.errors[0].reason,
            SourceErrorReason::EntryTitleNotFound
        );
    }

    #[test]
    fn should_treat_null_data_as_empty() {
        let results = normalize(serde_json::json!({"data": null})).unwrap();
        assert!(results.is_empty());
    }
}
