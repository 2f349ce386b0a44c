use dracin_source_helper::{cover, tags, tags::Tag};
use dracin_source_prelude::serde_json::{self, Value};
use dracin_source_prelude::{
    build_url, fetch_json, non_blank, NativeId, NormalizedResult, SearchResult, SourceError,
    SourceErrorReason,
};

// Results come grouped, the books of every group make up the result set.
#[derive(Debug, serde::Deserialize)]
struct Envelope {
    data: Option<Data>,
}

#[derive(Debug, serde::Deserialize)]
struct Data {
    search_data: Option<Vec<Group>>,
}

#[derive(Debug, serde::Deserialize)]
struct Group {
    books: Option<Vec<Value>>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct Entry {
    book_id: Option<NativeId>,
    book_name: Option<String>,
    thumb_url: Option<String>,
    #[serde(rename = "abstract")]
    summary: Option<String>,
    stat_infos: Option<Vec<Tag>>,
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
            .with_cover(cover::usable(self.thumb_url.as_deref()))?;
        entry.synopsis = non_blank(self.summary);
        entry.tags = tags::collect(self.stat_infos.iter().flatten());
        Ok(entry)
    }
}

pub(crate) async fn fetch(
    client: &reqwest::Client,
    base_url: &str,
    query: &str,
    limit: u16,
) -> Result<Value, SourceError> {
    let url = build_url(
        super::ID,
        base_url,
        "/search",
        &[
            ("query", query),
            ("limit", limit.to_string().as_str()),
            ("offset", "0"),
        ],
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
    let books = envelope
        .data
        .and_then(|data| data.search_data)
        .unwrap_or_default()
        .into_iter()
        .flat_map(|group| group.books.unwrap_or_default())
        .collect();
    Ok(SearchResult::collect(super::ID, books, Entry::try_into))
}
