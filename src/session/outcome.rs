use dracin_source_manager::prelude::{
    ErrorKind, NormalizedResult, SearchResult, SourceError, SourceId,
};

/// Shown for every failure, whatever the source or the cause.
pub const FAILURE_MESSAGE: &str = "No results found, please try again.";

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "state", content = "results", rename_all = "lowercase")]
pub enum SearchOutcome {
    Idle,
    Loading,
    Success(Vec<NormalizedResult>),
    Empty,
    Failure(FailureDescriptor),
}

impl Default for SearchOutcome {
    fn default() -> Self {
        Self::Idle
    }
}

impl SearchOutcome {
    pub fn resolve(result: Result<SearchResult, SourceError>) -> Self {
        match result {
            Ok(found) if found.is_empty() => Self::Empty,
            Ok(found) => Self::Success(found.entries),
            Err(err) => {
                let failure = FailureDescriptor::from(&err);
                tracing::debug!("{} search failed with {:?} error", failure.source, failure.kind);
                Self::Failure(failure)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FailureDescriptor {
    pub source: SourceId,
    #[serde(skip)]
    pub kind: ErrorKind,
    pub message: &'static str,
}

impl From<&SourceError> for FailureDescriptor {
    fn from(err: &SourceError) -> Self {
        Self {
            source: err.origin,
            kind: err.kind(),
            message: FAILURE_MESSAGE,
        }
    }
}
