pub use serde_json;
pub use url;

use std::collections::HashSet;
use std::time::Duration;
use url::ParseError;

mod fetch;
mod source;

pub use fetch::{build_resource_url, build_url, fetch_json};
pub use source::{CoverPolicy, SourceDescriptor, SourceId, DESCRIPTORS};

/// Upstream gateway every source is reached through unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TIMEOUT: u64 = 10;

pub fn build_client(origin: SourceId, timeout: u64) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout))
        .build()
        .map_err(|err| {
            SourceError::new(
                origin,
                SourceErrorReason::UnableToBuildClient {
                    cause: err.to_string(),
                },
            )
        })
}

pub trait SourceBuilder: std::fmt::Debug {
    fn build(self) -> Result<Box<dyn Source + Send + Sync + 'static>, SourceError>;
}

/// One upstream catalog.
///
/// `fetch` returns the payload exactly as the upstream sent it, `normalize`
/// reshapes it into renderable records. Neither keeps local state, so the same
/// query against the same upstream state yields the same result.
#[async_trait::async_trait]
pub trait Source: std::fmt::Debug + Send + Sync {
    fn id(&self) -> SourceId;

    async fn fetch(&self, query: &str) -> Result<serde_json::Value, SourceError>;

    fn normalize(&self, payload: serde_json::Value) -> Result<SearchResult, SourceError>;

    async fn search(&self, query: &str) -> Result<SearchResult, SourceError> {
        let payload = self.fetch(query).await?;
        self.normalize(payload)
    }

    /// Full record of one drama, for sources exposing a detail page.
    async fn detail(&self, _native: &str) -> Result<DramaDetail, SourceError> {
        Err(SourceError::new(self.id(), SourceErrorReason::Unsupported))
    }

    /// Episodes of one drama, ordered by index.
    async fn episodes(&self, _native: &str) -> Result<Vec<Episode>, SourceError> {
        Err(SourceError::new(self.id(), SourceErrorReason::Unsupported))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResult {
    pub entries: Vec<NormalizedResult>,
    /// Records that were skipped during normalization.
    pub errors: Vec<SourceError>,
}

impl From<Vec<NormalizedResult>> for SearchResult {
    fn from(entries: Vec<NormalizedResult>) -> Self {
        Self {
            entries,
            errors: Vec::new(),
        }
    }
}

impl SearchResult {
    /// Decodes every raw record as `E` and maps it through `convert`. A record
    /// that fails either step lands in `errors` and the rest of the batch goes on.
    /// When several records share an identity only the first one is kept.
    pub fn collect<E, F>(origin: SourceId, records: Vec<serde_json::Value>, convert: F) -> Self
    where
        E: serde::de::DeserializeOwned,
        F: Fn(E) -> Result<NormalizedResult, SourceError>,
    {
        let (found, errors) = collect_records(origin, records, convert);
        let mut seen = HashSet::with_capacity(found.len());
        let entries = found
            .into_iter()
            .filter(|entry| {
                let fresh = seen.insert(entry.identity.clone());
                if !fresh {
                    tracing::trace!("{origin} skipping duplicate {}", entry.identity);
                }
                fresh
            })
            .collect();
        Self { entries, errors }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decodes every raw record as `E` and maps it through `convert`, splitting
/// the batch into what could be read and why the rest could not.
pub fn collect_records<E, T, F>(
    origin: SourceId,
    records: Vec<serde_json::Value>,
    convert: F,
) -> (Vec<T>, Vec<SourceError>)
where
    E: serde::de::DeserializeOwned,
    F: Fn(E) -> Result<T, SourceError>,
{
    let mut found = Vec::with_capacity(records.len());
    let mut errors = Vec::new();
    for record in records {
        let item = serde_json::from_value::<E>(record)
            .map_err(|err| {
                SourceError::new(
                    origin,
                    SourceErrorReason::EntryInvalid {
                        cause: err.to_string(),
                    },
                )
            })
            .and_then(&convert);
        match item {
            Ok(entry) => found.push(entry),
            Err(err) => {
                tracing::trace!("{origin} skipping record: {err}");
                errors.push(err);
            }
        }
    }
    (found, errors)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    UpstreamFormat,
    /// The source has no such endpoint.
    Unsupported,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceError {
    pub origin: SourceId,
    pub reason: SourceErrorReason,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SourceErrorReason {
    EntryIdentityNotFound,
    EntryTitleNotFound,
    EntryCoverNotFound,
    EntryInvalid { cause: String },
    Unsupported,
    UnableToBuildClient { cause: String },
    UnableToBuildUrl { cause: ParseError },
    UnableToQuery { url: String, cause: String },
    UnexpectedStatus { url: String, status: u16 },
    UnableToRead { url: String, cause: String },
    UnexpectedPayload { cause: String },
}

impl SourceErrorReason {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnableToBuildClient { .. }
            | Self::UnableToBuildUrl { .. }
            | Self::UnableToQuery { .. }
            | Self::UnexpectedStatus { .. } => ErrorKind::Network,
            Self::Unsupported => ErrorKind::Unsupported,
            _ => ErrorKind::UpstreamFormat,
        }
    }
}

impl SourceError {
    pub fn new(origin: SourceId, reason: SourceErrorReason) -> Self {
        Self { origin, reason }
    }

    pub fn kind(&self) -> ErrorKind {
        self.reason.kind()
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SourceError {{ origin={:?}, reason={:?} }}",
            self.origin.as_str(),
            self.reason
        )
    }
}

impl std::error::Error for SourceError {}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Badge {
    pub text: String,
    pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NormalizedResult {
    /// Source qualified, unique within a result set.
    pub identity: String,
    pub source: SourceId,
    pub title: String,
    pub cover_url: Option<String>,
    pub synopsis: Option<String>,
    pub tags: Vec<String>,
    pub badge: Option<Badge>,
}

impl NormalizedResult {
    pub fn new<T: Into<String>>(source: SourceId, native: &NativeId, title: T) -> Self {
        Self {
            identity: source.qualify(native),
            source,
            title: title.into(),
            cover_url: None,
            synopsis: None,
            tags: Vec::new(),
            badge: None,
        }
    }

    /// Applies the cover policy of the source: under [`CoverPolicy::Drop`] a
    /// record without cover is rejected.
    pub fn with_cover(mut self, cover_url: Option<String>) -> Result<Self, SourceError> {
        if cover_url.is_none() && self.source.descriptor().cover_policy == CoverPolicy::Drop {
            return Err(SourceError::new(
                self.source,
                SourceErrorReason::EntryCoverNotFound,
            ));
        }
        self.cover_url = cover_url;
        Ok(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DramaDetail {
    pub identity: String,
    pub source: SourceId,
    pub title: String,
    pub cover_url: Option<String>,
    pub synopsis: Option<String>,
    pub tags: Vec<String>,
    pub episode_count: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Episode {
    pub identity: String,
    /// Zero based position in the drama.
    pub index: u32,
    pub title: String,
    pub cover_url: Option<String>,
    pub video_url: Option<String>,
}

/// Upstream record key, numeric on some sources and textual on others.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum NativeId {
    Number(u64),
    Text(String),
}

impl NativeId {
    /// Blank keys cannot address anything and count as missing.
    pub fn usable(self) -> Option<Self> {
        match self {
            Self::Text(inner) if inner.trim().is_empty() => None,
            Self::Text(inner) => Some(Self::Text(inner.trim().to_string())),
            other => Some(other),
        }
    }
}

impl std::fmt::Display for NativeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(inner) => write!(f, "{inner}"),
            Self::Text(inner) => f.write_str(inner),
        }
    }
}

/// Trims the value and drops it when nothing is left.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|inner| inner.trim().to_string())
        .filter(|inner| !inner.is_empty())
}
