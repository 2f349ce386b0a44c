use dracin_source_prelude::serde_json::Value;
use dracin_source_prelude::{
    build_client, SearchResult, Source, SourceBuilder, SourceError, SourceId, DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT,
};

mod search;

pub const ID: SourceId = SourceId::Flickreels;

#[derive(Debug, serde::Deserialize)]
pub struct SourceFlickreelsConfig {
    #[serde(default = "SourceFlickreelsConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "SourceFlickreelsConfig::default_timeout")]
    pub timeout: u64,
}

impl Default for SourceFlickreelsConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout: Self::default_timeout(),
        }
    }
}

impl SourceFlickreelsConfig {
    fn default_base_url() -> String {
        DEFAULT_BASE_URL.into()
    }

    fn default_timeout() -> u64 {
        DEFAULT_TIMEOUT
    }
}

impl SourceBuilder for SourceFlickreelsConfig {
    fn build(self) -> Result<Box<dyn Source + Send + Sync + 'static>, SourceError> {
        tracing::info!("building {ID} source on {:?}", self.base_url);
        Ok(Box::new(SourceFlickreels {
            base_url: self.base_url,
            client: build_client(ID, self.timeout)?,
        }))
    }
}

#[derive(Debug)]
pub struct SourceFlickreels {
    base_url: String,
    client: reqwest::Client,
}

impl Default for SourceFlickreels {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl SourceFlickreels {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Source for SourceFlickreels {
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
}

#[cfg(test)]
mod tests {
    use super::SourceFlickreels;
    use dracin_source_prelude::Source;

    #[tokio::test]
    async fn basic_search() {
        let mut server = mockito::Server::new_async().await;
        let source = SourceFlickreels::new(server.url());

        let search_page = server
            .mock("GET", "/api/flickreels/search?keyword=the+heir")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("./search.json"))
            .create_async()
            .await;

        let results = source.search("the heir").await.unwrap();
        assert_eq!(results.entries.len(), 2);
        assert_eq!(results.entries[0].identity, "flickreels:42");
        assert_eq!(results.entries[0].tags.len(), 3);

        search_page.assert_async().await;
    }
}
