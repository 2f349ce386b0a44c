use super::cache::{CacheConfig, SourceCache};
use dracin_source_manager::prelude::{DramaDetail, Episode, SearchResult, SourceError, SourceId};
use dracin_source_manager::SourceManager;

/// Routes a lookup to one source and memoizes successful results for a while.
#[derive(Clone)]
pub struct SearchService {
    manager: SourceManager,
    cache: SourceCache<SearchResult>,
    details: SourceCache<DramaDetail>,
    episodes: SourceCache<Vec<Episode>>,
}

impl SearchService {
    pub fn new(manager: SourceManager, cache: &CacheConfig) -> Self {
        Self {
            manager,
            cache: cache.build(),
            details: cache.build(),
            episodes: cache.build(),
        }
    }

    pub async fn detail(&self, source: SourceId, native: &str) -> Result<DramaDetail, SourceError> {
        let key = (source, native.to_string());
        if let Some(found) = self.details.get(&key) {
            tracing::trace!("{source} cache hit for detail of {native:?}");
            return Ok(found);
        }
        let found = self.manager.detail(source, native).await?;
        self.details.insert(key, found.clone()).await;
        Ok(found)
    }

    pub async fn episodes(
        &self,
        source: SourceId,
        native: &str,
    ) -> Result<Vec<Episode>, SourceError> {
        let key = (source, native.to_string());
        if let Some(found) = self.episodes.get(&key) {
            tracing::trace!("{source} cache hit for episodes of {native:?}");
            return Ok(found);
        }
        let found = self.manager.episodes(source, native).await?;
        self.episodes.insert(key, found.clone()).await;
        Ok(found)
    }

    pub async fn search(&self, source: SourceId, query: &str) -> Result<SearchResult, SourceError> {
        let key = (source, query.to_string());
        if let Some(found) = self.cache.get(&key) {
            tracing::trace!("{source} cache hit for {query:?}");
            return Ok(found);
        }
        let found = self.manager.search(source, query).await?;
        self.cache.insert(key, found.clone()).await;
        Ok(found)
    }
}
