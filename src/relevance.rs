// src/relevance.rs
//! Relevance scorer: fixed award-season vocabularies matched as lower-case
//! substrings.
//!
//! - every award term hit adds `AWARD_WEIGHT` and becomes a signal
//! - every strong term hit adds `STRONG_WEIGHT`, on top of any award hit for the same word
//! - every negative term hit subtracts `NEGATIVE_WEIGHT`
//!
//! The result is clamped to `[MIN_SCORE, MAX_SCORE]`. Overlapping vocabularies
//! double count on purpose; changing that shifts every existing threshold.

use serde::Serialize;
use tracing::debug;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;
pub const MAX_SIGNALS: usize = 10;

pub const AWARD_WEIGHT: f64 = 1.0;
pub const STRONG_WEIGHT: f64 = 0.6;
pub const NEGATIVE_WEIGHT: f64 = 0.8;

pub const AWARD_TERMS: &[&str] = &[
    "oscar",
    "oscars",
    "academy award",
    "academy awards",
    "bafta",
    "emmy",
    "golden globe",
    "golden globes",
    "sag",
    "dga",
    "pga",
    "wga",
    "guild",
    "nominee",
    "nominees",
    "nomination",
    "nominations",
    "shortlist",
    "longlist",
    "winner",
    "winners",
    "wins",
    "for your consideration",
    "fyc",
    "campaign",
    "contender",
    "awards season",
    "critics choice",
    "cannes",
    "venice",
    "berlin",
    "sundance",
    "telluride",
    "tiff",
];

pub const STRONG_TERMS: &[&str] = &[
    "nominations",
    "nominees",
    "shortlist",
    "longlist",
    "winners",
    "wins",
    "eligibility",
    "rules",
    "deadline",
];

pub const NEGATIVE_TERMS: &[&str] = &["trailer", "teaser", "box office", "first look", "poster"];

/// Result of relevance scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relevance {
    pub score: f64,
    /// Matched award terms, first-match order, unique, at most `MAX_SIGNALS`.
    pub signals: Vec<String>,
}

impl Default for Relevance {
    fn default() -> Self {
        Self {
            score: 0.0,
            signals: Vec::new(),
        }
    }
}

/// Score free text.
pub fn score(text: &str) -> Relevance {
    let t = text.to_lowercase();
    let mut total = 0.0_f64;
    let mut signals: Vec<String> = Vec::new();

    for term in AWARD_TERMS {
        if t.contains(term) {
            total += AWARD_WEIGHT;
            if !signals.iter().any(|s| s == term) {
                signals.push((*term).to_string());
            }
        }
    }

    for term in STRONG_TERMS {
        if t.contains(term) {
            total += STRONG_WEIGHT;
        }
    }

    for term in NEGATIVE_TERMS {
        if t.contains(term) {
            total -= NEGATIVE_WEIGHT;
        }
    }

    signals.truncate(MAX_SIGNALS);
    let score = total.clamp(MIN_SCORE, MAX_SCORE);
    debug!(target: "relevance", raw = total, score, signals = signals.len(), "scored");

    Relevance { score, signals }
}

/// Score an item's title and summary together.
pub fn score_item(title: &str, summary: &str) -> Relevance {
    score(&format!("{title} {summary}"))
}
