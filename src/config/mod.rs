// src/config/mod.rs
pub mod sources;

use std::time::Duration;

use crate::ingest::fetch::DEFAULT_TIMEOUT_SECS;
use crate::ingest::providers::feed::DEFAULT_FEED_LIMIT;
use crate::ingest::providers::listing::DEFAULT_LISTING_LIMIT;
use crate::rank::DEFAULT_MIN_SCORE;

/// Tunables for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParams {
    pub min_score: f64,
    pub mark_seen: bool,
    pub feed_limit: usize,
    pub listing_limit: usize,
    pub fetch_timeout: Duration,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            mark_seen: false,
            feed_limit: DEFAULT_FEED_LIMIT,
            listing_limit: DEFAULT_LISTING_LIMIT,
            fetch_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RunParams {
    /// Non-finite thresholds fall back to the default.
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = if min_score.is_finite() {
            min_score
        } else {
            DEFAULT_MIN_SCORE
        };
        self
    }

    pub fn with_mark_seen(mut self, mark_seen: bool) -> Self {
        self.mark_seen = mark_seen;
        self
    }
}
