// src/error.rs
//! Error types shared across the pipeline.
//!
//! Per-source failures are not errors here: they are collected as
//! [`crate::pipeline::SourceFailure`] values and the run continues.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems with the source list. Raised before any fetching happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no sources file found (set AWARDS_SOURCES_PATH or create sources.json)")]
    Missing,

    #[error("source list is empty")]
    Empty,

    #[error("source #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("duplicate source name `{name}`")]
    DuplicateName { name: String },

    #[error("source `{name}` has invalid location `{location}`")]
    InvalidLocation { name: String, location: String },

    #[error("reading sources from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing sources: {0}")]
    Parse(String),
}

/// Failures loading or saving the seen-set.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("reading seen state from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("seen state at {path} is not a JSON string array")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("writing seen state to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Transport-level fetch failure.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("no fixture registered for {url}")]
    NotFound { url: String },
}
