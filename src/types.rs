use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fetched post representing a housing offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawListing {
    pub id: String,
    pub subreddit: String,
    pub title: String,
    pub body: String,
    pub author: String,
    pub flair: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    pub url: String,
    pub score: i64,
    pub num_comments: u32,
}

impl RawListing {
    /// Title and body joined, the text the filter actually scans.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

/// Outcome of running one listing through the filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub accepted: bool,
    pub price: Option<u32>,
    pub neighborhood: Option<String>,
    pub apartment_type: Option<String>,
    pub reject_reason: Option<RejectReason>,
}

impl MatchResult {
    pub fn rejected(reason: RejectReason) -> Self {
        Self {
            accepted: false,
            price: None,
            neighborhood: None,
            apartment_type: None,
            reject_reason: Some(reason),
        }
    }
}

/// Why a listing was filtered out. Recorded on the first failing check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NotAnOffering,
    ExcludedTerm,
    NoTypeMatch,
    NoNeighborhoodMatch,
    PriceOutOfRange,
    MissingPrice,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RejectReason::NotAnOffering => "not an offering",
            RejectReason::ExcludedTerm => "excluded term",
            RejectReason::NoTypeMatch => "no apartment type match",
            RejectReason::NoNeighborhoodMatch => "no neighborhood match",
            RejectReason::PriceOutOfRange => "price out of range",
            RejectReason::MissingPrice => "no price detected",
        };
        write!(f, "{}", s)
    }
}

/// Counters for one scrape cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub fetched: usize,
    pub new: usize,
    pub passed: usize,
    pub appended: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum PadwatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("seen-posts store corrupt at {path}: {reason}")]
    StoreCorrupt { path: String, reason: String },

    #[error("sink write failed: {0}")]
    SinkWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, PadwatchError>;
