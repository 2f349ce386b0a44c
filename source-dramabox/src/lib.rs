use dracin_source_prelude::serde_json::Value;
use dracin_source_prelude::{
    build_client, DramaDetail, Episode, SearchResult, Source, SourceBuilder, SourceError,
    SourceId, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};

mod detail;
mod episodes;
mod search;

pub const ID: SourceId = SourceId::Dramabox;

#[derive(Debug, serde::Deserialize)]
pub struct SourceDramaboxConfig {
    #[serde(default = "SourceDramaboxConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "SourceDramaboxConfig::default_timeout")]
    pub timeout: u64,
}

impl Default for SourceDramaboxConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout: Self::default_timeout(),
        }
    }
}

impl SourceDramaboxConfig {
    fn default_base_url() -> String {
        DEFAULT_BASE_URL.into()
    }

    fn default_timeout() -> u64 {
        DEFAULT_TIMEOUT
    }
}

impl SourceBuilder for SourceDramaboxConfig {
    fn build(self) -> Result<Box<dyn Source + Send + Sync + 'static>, SourceError> {
        tracing::info!("building {ID} source on {:?}", self.base_url);
        Ok(Box::new(SourceDramabox {
            base_url: self.base_url,
            client: build_client(ID, self.timeout)?,
        }))
    }
}

#[derive(Debug)]
pub struct SourceDramabox {
    base_url: String,
    client: reqwest::Client,
}

impl Default for SourceDramabox {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl SourceDramabox {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Source for SourceDramabox {
    fn id(&self) -> SourceId {
        ID
    }

    async fn fetch(&self, query: &str) -> Result<Value, SourceError> {
        tracing::debug!("{ID} searching {query:?}");
        search::fetch(&self.client, &self.base_url, query).await
    }

    fn normalize(&self, payload: Value) -> Result<SearchResult, SourceError> {
        search::normalize(payload)
    }

    async fn detail(&self, native: &str) -> Result<DramaDetail, SourceError> {
        tracing::debug!("{ID} fetching detail of {native:?}");
        let payload = detail::fetch(&self.client, &self.base_url, native).await?;
        detail::normalize(payload)
    }

    async fn episodes(&self, native: &str) -> Result<Vec<Episode>, SourceError> {
        tracing::debug!("{ID} fetching episodes of {native:?}");
        let payload = episodes::fetch(&self.client, &self.base_url, native).await?;
        episodes::normalize(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::{SourceDramabox, SourceDramaboxConfig};
    use dracin_source_prelude::{Source, SourceBuilder, SourceId};

    #[test]
    fn should_build_from_config() {
        let config: SourceDramaboxConfig =
            serde_json::from_str(r#"{"base_url": "http://gateway:9000"}"#).unwrap();
        assert_eq!(config.base_url, "http://gateway:9000");
        assert_eq!(config.timeout, 10);
        assert_eq!(config.build().unwrap().id(), SourceId::Dramabox);
    }

    #[tokio::test]
    async fn basic_search() {
        let mut server = mockito::Server::new_async().await;
        let source = SourceDramabox::new(server.url());

        let search_page = server
            .mock("GET", "/api/dramabox/search?query=love+story")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("./search.json"))
            .create_async()
            .await;

        let results = source.search("love story").await.unwrap();
        assert_eq!(results.entries.len(), 3);
        assert_eq!(results.errors.len(), 1);
        assert_eq!(results.entries[0].identity, "dramabox:41000102345");

        search_page.assert_async().await;
    }

    #[tokio::test]
    async fn should_fetch_detail_and_episodes() {
        let mut server = mockito::Server::new_async().await;
        let source = SourceDramabox::new(server.url());

        let detail_page = server
            .mock("GET", "/api/dramabox/detail/41000102345")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("./detail.json"))
            .create_async()
            .await;
        let episodes_page = server
            .mock("GET", "/api/dramabox/allepisode/41000102345")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("./episodes.json"))
            .create_async()
            .await;

        let detail = source.detail("41000102345").await.unwrap();
        assert_eq!(detail.title, "Love Story in the Rain");
        let episodes = source.episodes("41000102345").await.unwrap();
        assert_eq!(episodes.len(), 3);

        detail_page.assert_async().await;
        episodes_page.assert_async().await;
    }
}
