// src/ingest/types.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::ingest::fetch::Fetcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Feed,
    Listing,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Feed => "feed",
            SourceKind::Listing => "listing",
        }
    }
}

/// A configured origin the pipeline polls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub kind: SourceKind,
    pub location: Url,
    /// Opaque label such as "trade", "critic" or "studio".
    #[serde(default)]
    pub classification: String,
    #[serde(default)]
    pub affects_nomination: bool,
    #[serde(default)]
    pub affects_win: bool,
}

/// Fields pulled straight out of feed XML or listing HTML, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published_at: Option<String>, // ISO-8601 UTC
}

/// A normalized candidate item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub published_at: Option<String>,
}

/// Produces normalized items for one source.
#[async_trait::async_trait]
pub trait SourceAdapter: Send + Sync {
    async fn fetch_items(&self, source: &Source, fetcher: &dyn Fetcher) -> Result<Vec<Item>>;
    fn kind(&self) -> SourceKind;
}

/// An item with its relevance score and the attributes of the source it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub id: String,
    #[serde(flatten)]
    pub item: Item,
    pub score: f64,
    pub signals: Vec<String>,
    pub source_name: String,
    pub source_kind: SourceKind,
    pub classification: String,
    pub affects_nomination: bool,
    pub affects_win: bool,
}
