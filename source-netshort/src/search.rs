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
#[serde(rename_all = "camelCase")]
pub(crate) struct Entry {
    short_play_id: Option<NativeId>,
    short_play_name: Option<String>,
    short_play_cover: Option<String>,
    shot_introduce: Option<String>,
    label_array: Option<Vec<Tag>>,
}

impl Entry {
    pub(crate) fn try_into(self) -> Result<NormalizedResult, SourceError> {
        let id = self
            .short_play_id
            .and_then(NativeId::usable)
            .ok_or_else(|| SourceError::new(super::ID, SourceErrorReason::EntryIdentityNotFound))?;
        let title = non_blank(self.short_play_name)
            .ok_or_else(|| SourceError::new(super::ID, SourceErrorReason::EntryTitleNotFound))?;

        let mut entry = NormalizedResult::new(super::ID, &id, title)
            .with_cover(cover::usable(self.short_play_cover.as_deref()))?;
        entry.synopsis = non_blank(self.shot_introduce);
        entry.tags = tags::collect(self.label_array.iter().flatten());
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
