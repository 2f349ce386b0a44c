use dracin_source_helper::{cover, tags, tags::Tag};
use dracin_source_prelude::serde_json::{self, Value};
use dracin_source_prelude::{
    build_url, fetch_json, non_blank, NativeId, NormalizedResult, SearchResult, SourceError,
    SourceErrorReason,
};

#[derive(Debug, serde::Deserialize)]
pub(crate) struct Entry {
    key: Option<NativeId>,
    title: Option<String>,
    cover: Option<String>,
    desc: Option<String>,
    content_tags: Option<Vec<Tag>>,
}

impl Entry {
    pub(crate) fn try_into(self) -> Result<NormalizedResult, SourceError> {
        let id = self
            .key
            .and_then(NativeId::usable)
            .ok_or_else(|| SourceError::new(super::ID, SourceErrorReason::EntryIdentityNotFound))?;
        let title = non_blank(self.title)
            .ok_or_else(|| SourceError::new(super::ID, SourceErrorReason::EntryTitleNotFound))?;

        let mut entry = NormalizedResult::new(super::ID, &id, title)
            .with_cover(cover::usable(self.cover.as_deref()))?;
        entry.synopsis = non_blank(self.desc);
        entry.tags = tags::collect(self.content_tags.iter().flatten());
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
