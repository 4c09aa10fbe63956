// src/pipeline.rs
//! One digest run: sources in order → adapter → seen filter → score → rank.
//!
//! A failing source is recorded and skipped; only a bad source list aborts
//! the run.

use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::sources::validate_sources;
use crate::config::RunParams;
use crate::error::{ConfigError, PersistenceError};
use crate::ingest::ensure_metrics_described;
use crate::ingest::fetch::Fetcher;
use crate::ingest::providers::{FeedAdapter, ListingAdapter};
use crate::ingest::types::{Item, ScoredItem, Source, SourceAdapter, SourceKind};
use crate::rank::rank;
use crate::relevance::score_item;
use crate::seen::{stable_id, DedupTracker, SeenRepository, SeenSet};

/// A source that could not be fetched or parsed this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub source: String,
    pub detail: String,
}

/// Everything the renderer needs.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub generated_at: DateTime<Utc>,
    pub min_score: f64,
    pub items: Vec<ScoredItem>,
    pub failures: Vec<SourceFailure>,
}

impl Digest {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Outcome of [`run_with_repository`]. A failed save does not void the digest.
#[derive(Debug)]
pub struct RunReport {
    pub digest: Digest,
    pub persisted: Result<(), PersistenceError>,
}

pub struct Pipeline<'a> {
    fetcher: &'a dyn Fetcher,
    feed: FeedAdapter,
    listing: ListingAdapter,
    params: RunParams,
}

fn scored(item: Item, id: String, source: &Source) -> ScoredItem {
    let relevance = score_item(&item.title, &item.summary);
    ScoredItem {
        id,
        item,
        score: relevance.score,
        signals: relevance.signals,
        source_name: source.name.clone(),
        source_kind: source.kind,
        classification: source.classification.clone(),
        affects_nomination: source.affects_nomination,
        affects_win: source.affects_win,
    }
}

impl<'a> Pipeline<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, params: RunParams) -> Self {
        Self {
            fetcher,
            feed: FeedAdapter {
                limit: params.feed_limit,
            },
            listing: ListingAdapter {
                limit: params.listing_limit,
            },
            params,
        }
    }

    fn adapter_for(&self, kind: SourceKind) -> &dyn SourceAdapter {
        match kind {
            SourceKind::Feed => &self.feed,
            SourceKind::Listing => &self.listing,
        }
    }

    /// Run every source once and return the ranked digest.
    ///
    /// Items that make the threshold are marked in `tracker` (a no-op unless
    /// it is in mark-seen mode), so a repeat of the same item from a later
    /// source in this run is skipped too.
    pub async fn run(
        &self,
        sources: &[Source],
        tracker: &mut DedupTracker,
    ) -> Result<Digest, ConfigError> {
        validate_sources(sources)?;
        ensure_metrics_described();

        let min_score = self.params.min_score;
        let mut collected = Vec::new();
        let mut failures = Vec::new();

        for source in sources {
            let adapter = self.adapter_for(source.kind);
            let items = match adapter.fetch_items(source, self.fetcher).await {
                Ok(items) => items,
                Err(e) => {
                    let detail = format!("{e:#}");
                    warn!(target: "ingest", source = %source.name, error = %detail, "source failed");
                    counter!("ingest_source_errors_total").increment(1);
                    failures.push(SourceFailure {
                        source: source.name.clone(),
                        detail,
                    });
                    continue;
                }
            };

            let fetched = items.len();
            let mut already_seen = 0usize;
            for item in items {
                let id = stable_id(&item.url, &item.title);
                if tracker.is_seen(&id) {
                    already_seen += 1;
                    continue;
                }
                let s = scored(item, id, source);
                if s.score >= min_score {
                    tracker.mark_seen(&s.id);
                }
                collected.push(s);
            }

            counter!("ingest_seen_total").increment(already_seen as u64);
            info!(
                target: "ingest",
                source = %source.name,
                kind = source.kind.as_str(),
                fetched,
                already_seen,
                "source done"
            );
        }

        let items = rank(collected, min_score);
        counter!("ingest_kept_total").increment(items.len() as u64);

        Ok(Digest {
            generated_at: Utc::now(),
            min_score,
            items,
            failures,
        })
    }
}

/// Load the seen-set, run, and persist it again whatever the sources did.
///
/// A load failure is logged and treated as "nothing seen yet". A save failure
/// lands in [`RunReport::persisted`].
pub async fn run_with_repository(
    sources: &[Source],
    fetcher: &dyn Fetcher,
    repo: &dyn SeenRepository,
    params: RunParams,
) -> Result<RunReport, ConfigError> {
    validate_sources(sources)?;

    let seen = repo.load().unwrap_or_else(|e| {
        warn!(error = %e, "could not load seen state; assuming nothing seen");
        SeenSet::new()
    });
    let mut tracker = DedupTracker::new(seen, params.mark_seen);

    let pipeline = Pipeline::new(fetcher, params);
    let digest = pipeline.run(sources, &mut tracker).await?;

    let seen = tracker.into_seen();
    let persisted = repo.persist(&seen);
    if let Err(e) = &persisted {
        warn!(error = %e, "could not save seen state");
    }

    info!(
        items = digest.item_count(),
        failures = digest.failures.len(),
        seen = seen.len(),
        "run complete"
    );
    Ok(RunReport { digest, persisted })
}
