use prelude::{
    DramaDetail, Episode, SearchResult, Source, SourceBuilder, SourceError, SourceErrorReason,
    SourceId,
};
use std::sync::Arc;

pub mod prelude {
    pub use dracin_source_prelude::*;
}

type BoxedSource = Box<dyn Source + Send + Sync + 'static>;

#[derive(Debug, Default, serde::Deserialize)]
pub struct SourceManagerConfig {
    #[serde(default)]
    pub dramabox: dracin_source_dramabox::SourceDramaboxConfig,
    #[serde(default)]
    pub reelshort: dracin_source_reelshort::SourceReelshortConfig,
    #[serde(default)]
    pub netshort: dracin_source_netshort::SourceNetshortConfig,
    #[serde(default)]
    pub melolo: dracin_source_melolo::SourceMeloloConfig,
    #[serde(default)]
    pub flickreels: dracin_source_flickreels::SourceFlickreelsConfig,
    #[serde(default)]
    pub freereels: dracin_source_freereels::SourceFreereelsConfig,
}

impl SourceManagerConfig {
    pub fn build(self) -> Result<SourceManager, SourceError> {
        // same order as SourceId::ALL
        Ok(SourceManager(Arc::new(SourceManagerInner {
            sources: [
                self.dramabox.build()?,
                self.reelshort.build()?,
                self.netshort.build()?,
                self.melolo.build()?,
                self.flickreels.build()?,
                self.freereels.build()?,
            ],
        })))
    }
}

/// Table of the six sources, looked up by [`SourceId`].
#[derive(Clone, Debug, Default)]
pub struct SourceManager(Arc<SourceManagerInner>);

#[derive(Debug)]
struct SourceManagerInner {
    sources: [BoxedSource; 6],
}

impl Default for SourceManagerInner {
    fn default() -> Self {
        Self {
            sources: [
                Box::<dracin_source_dramabox::SourceDramabox>::default(),
                Box::<dracin_source_reelshort::SourceReelshort>::default(),
                Box::<dracin_source_netshort::SourceNetshort>::default(),
                Box::<dracin_source_melolo::SourceMelolo>::default(),
                Box::<dracin_source_flickreels::SourceFlickreels>::default(),
                Box::<dracin_source_freereels::SourceFreereels>::default(),
            ],
        }
    }
}

impl SourceManager {
    /// Default table where the slot of `source.id()` is taken by `source`.
    pub fn with_source<S: Source + Send + Sync + 'static>(source: S) -> Self {
        Self::default().and_source(source)
    }

    /// Replaces the slot of `source.id()`. Only possible while the manager is not shared.
    pub fn and_source<S: Source + Send + Sync + 'static>(mut self, source: S) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.0) {
            let index = source.id().index();
            inner.sources[index] = Box::new(source);
        } else {
            tracing::warn!("unable to replace {} source on a shared manager", source.id());
        }
        self
    }

    pub fn source(&self, id: SourceId) -> &(dyn Source + Send + Sync) {
        self.0.sources[id.index()].as_ref()
    }

    pub async fn search(&self, id: SourceId, query: &str) -> Result<SearchResult, SourceError> {
        if query.is_empty() {
            tracing::debug!("skipping {id} search with empty query");
            return Ok(SearchResult::default());
        }
        let res = self.source(id).search(query).await;
        match res {
            Ok(ref found) => tracing::debug!(
                "{id} found {} entries for {query:?}, skipped {}",
                found.entries.len(),
                found.errors.len()
            ),
            Err(ref err) => tracing::warn!("{id} failed searching {query:?}: {err}"),
        }
        res
    }

    /// A blank key is rejected without reaching the source.
    pub async fn detail(&self, id: SourceId, native: &str) -> Result<DramaDetail, SourceError> {
        let native = usable_key(id, native)?;
        let res = self.source(id).detail(native).await;
        if let Err(ref err) = res {
            tracing::warn!("{id} failed fetching detail of {native:?}: {err}");
        }
        res
    }

    /// A blank key is rejected without reaching the source.
    pub async fn episodes(&self, id: SourceId, native: &str) -> Result<Vec<Episode>, SourceError> {
        let native = usable_key(id, native)?;
        let res = self.source(id).episodes(native).await;
        match res {
            Ok(ref found) => tracing::debug!("{id} found {} episodes for {native:?}", found.len()),
            Err(ref err) => tracing::warn!("{id} failed fetching episodes of {native:?}: {err}"),
        }
        res
    }
}

fn usable_key(id: SourceId, native: &str) -> Result<&str, SourceError> {
    let native = native.trim();
    if native.is_empty() {
        tracing::debug!("skipping {id} lookup with empty key");
        return Err(SourceError::new(
            id,
            SourceErrorReason::EntryIdentityNotFound,
        ));
    }
    Ok(native)
}
