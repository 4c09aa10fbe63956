// src/lib.rs
//! Awards-season news digest.
//!
//! Polls RSS/Atom feeds and HTML listing pages, scores each item against a
//! fixed awards vocabulary, drops items already surfaced in earlier runs and
//! ranks the rest for a static digest page.

pub mod config;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod rank;
pub mod relevance;
pub mod render;
pub mod seen;

// ---- Re-exports for stable public API ----
pub use crate::config::RunParams;
pub use crate::error::{ConfigError, FetchError, PersistenceError};
pub use crate::ingest::fetch::{Fetcher, FixtureFetcher, HttpFetcher};
pub use crate::ingest::types::{Item, RawEntry, ScoredItem, Source, SourceKind};
pub use crate::pipeline::{run_with_repository, Digest, Pipeline, RunReport, SourceFailure};
pub use crate::seen::{DedupTracker, FileSeenRepository, MemorySeenRepository, SeenRepository, SeenSet};
