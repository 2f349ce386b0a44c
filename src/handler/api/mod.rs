pub mod detail;
pub mod live;
pub mod search;
pub mod sources;

use crate::session::outcome::SearchOutcome;
use dracin_source_prelude::SourceId;

/// What the front-end renders: which source answered, for which query, and how.
#[derive(Debug, serde::Serialize)]
pub struct SearchResponse {
    pub source: SourceId,
    pub query: String,
    pub outcome: SearchOutcome,
}
