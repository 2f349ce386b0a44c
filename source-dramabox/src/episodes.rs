use dracin_source_helper::cover;
use dracin_source_prelude::serde_json::{self, Value};
use dracin_source_prelude::{
    build_resource_url, collect_records, fetch_json, non_blank, Episode, NativeId, SourceError,
    SourceErrorReason,
};

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoPath {
    video_path: Option<String>,
    is_default: Option<u8>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Cdn {
    is_default: Option<u8>,
    video_path_list: Option<Vec<VideoPath>>,
}

/// Default flagged item when there is one, the first one otherwise.
fn preferred<T>(items: Vec<T>, is_default: impl Fn(&T) -> bool) -> Option<T> {
    let position = items.iter().position(is_default).unwrap_or(0);
    items.into_iter().nth(position)
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Entry {
    chapter_id: Option<NativeId>,
    chapter_index: Option<u32>,
    chapter_name: Option<String>,
    chapter_img: Option<String>,
    cdn_list: Option<Vec<Cdn>>,
}

impl Entry {
    pub(crate) fn try_into(self) -> Result<Episode, SourceError> {
        let id = self
            .chapter_id
            .and_then(NativeId::usable)
            .ok_or_else(|| SourceError::new(super::ID, SourceErrorReason::EntryIdentityNotFound))?;
        let index = self.chapter_index.ok_or_else(|| {
            SourceError::new(
                super::ID,
                SourceErrorReason::EntryInvalid {
                    cause: "missing chapterIndex".into(),
                },
            )
        })?;
        let video_url = preferred(self.cdn_list.unwrap_or_default(), |cdn| {
            cdn.is_default == Some(1)
        })
        .and_then(|cdn| {
            preferred(cdn.video_path_list.unwrap_or_default(), |path| {
                path.is_default == Some(1)
            })
        })
        .and_then(|path| non_blank(path.video_path));

        Ok(Episode {
            identity: super::ID.qualify(&id),
            index,
            title: non_blank(self.chapter_name).unwrap_or_else(|| format!("Episode {}", index + 1)),
            cover_url: cover::usable(self.chapter_img.as_deref()),
            video_url,
        })
    }
}

pub(crate) async fn fetch(
    client: &reqwest::Client,
    base_url: &str,
    native: &str,
) -> Result<Value, SourceError> {
    let url = build_resource_url(super::ID, base_url, &["allepisode", native])?;
    fetch_json(client, super::ID, url).await
}

pub(crate) fn normalize(payload: Value) -> Result<Vec<Episode>, SourceError> {
    let records: Option<Vec<Value>> = serde_json::from_value(payload).map_err(|err| {
        SourceError::new(
            super::ID,
            SourceErrorReason::UnexpectedPayload {
                cause: err.to_string(),
            },
        )
    })?;
    let (mut found, errors) =
        collect_records(super::ID, records.unwrap_or_default(), Entry::try_into);
    if !errors.is_empty() {
        tracing::debug!("{} skipped {} episodes", super::ID, errors.len());
    }
    found.sort_by_key(|episode| episode.index);
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_parse_episodes() {
        let mut server = mockito::Server::new_async().await;

        let episodes_page = server
            .mock("GET", "/api/dramabox/allepisode/41000102345")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("./episodes.json"))
            .create_async()
            .await;

        let payload = fetch(&reqwest::Client::new(), server.url().as_str(), "41000102345")
            .await
            .unwrap();
        let episodes = normalize(payload).unwrap();
        println!("episodes: {episodes:#?}");
        assert_eq!(episodes.len(), 3);

        assert_eq!(episodes[0].identity, "dramabox:700001");
        assert_eq!(episodes[0].index, 0);
        assert_eq!(
            episodes[0].video_url.as_deref(),
            Some("https://main.example.com/700001/540.mp4")
        );
        assert!(episodes[0]
            .cover_url
            .as_deref()
            .unwrap()
            .starts_with("https://wsrv.nl/"));

        // default cdn, then default quality
        assert_eq!(
            episodes[1].video_url.as_deref(),
            Some("https://main.example.com/700002/720.mp4")
        );
        assert_eq!(episodes[2].title, "Episode 4");
        assert_eq!(episodes[2].video_url, None);

        episodes_page.assert_async().await;
    }

    #[test]
    fn should_treat_null_as_empty() {
        assert!(normalize(Value::Null).unwrap().is_empty());
    }
}
