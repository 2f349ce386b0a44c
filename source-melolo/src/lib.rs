use dracin_source_prelude::serde_json::Value;
use dracin_source_prelude::{
    build_client, SearchResult, Source, SourceBuilder, SourceError, SourceId, DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT,
};

mod search;

const PAGE_SIZE: u16 = 10;
pub const ID: SourceId = SourceId::Melolo;

#[derive(Debug, serde::Deserialize)]
pub struct SourceMeloloConfig {
    #[serde(default = "SourceMeloloConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "SourceMeloloConfig::default_timeout")]
    pub timeout: u64,
}

impl Default for SourceMeloloConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout: Self::default_timeout(),
        }
    }
}

impl SourceMeloloConfig {
    fn default_base_url() -> String {
        DEFAULT_BASE_URL.into()
    }

    fn default_timeout() -> u64 {
        DEFAULT_TIMEOUT
    }
}

impl SourceBuilder for SourceMeloloConfig {
    fn build(self) -> Result<Box<dyn Source + Send + Sync + 'static>, SourceError> {
        tracing::info!("building {ID} source on {:?}", self.base_url);
        Ok(Box::new(SourceMelolo {
            base_url: self.base_url,
            client: build_client(ID, self.timeout)?,
        }))
    }
}

#[derive(Debug)]
pub struct SourceMelolo {
    base_url: String,
    client: reqwest::Client,
}

impl Default for SourceMelolo {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl SourceMelolo {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Source for SourceMelolo {
    fn id(&self) -> SourceId {
        ID
    }

    async fn fetch(&self, query: &str) -> Result<Value, SourceError> {
        tracing::debug!("{ID} searching {query:?}");
        search::fetch(&self.client, &self.base_url, query, PAGE_SIZE).await
    }

    fn normalize(&self, payload: Value) -> Result<SearchResult, SourceError> {
        search::normalize(payload)
    }
}
