// src/rank.rs
//! Threshold filter and ordering for the final digest.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime};

use crate::ingest::types::ScoredItem;

pub const DEFAULT_MIN_SCORE: f64 = 3.5;

/// Milliseconds since the epoch for an ISO-8601 timestamp.
/// Missing or unparseable values count as the epoch itself.
pub fn published_key(published: Option<&str>) -> i64 {
    let Some(raw) = published.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.timestamp_millis();
    }
    // Naive date-times are taken as UTC
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

fn by_score_then_recency(a: &ScoredItem, b: &ScoredItem) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| {
        published_key(b.item.published_at.as_deref())
            .cmp(&published_key(a.item.published_at.as_deref()))
    })
}

/// Keep items scoring at least `min_score`, highest score first, newest first
/// among equal scores. Equal keys keep their input order.
pub fn rank(items: Vec<ScoredItem>, min_score: f64) -> Vec<ScoredItem> {
    let mut kept: Vec<ScoredItem> = items.into_iter().filter(|i| i.score >= min_score).collect();
    kept.sort_by(by_score_then_recency);
    kept
}
