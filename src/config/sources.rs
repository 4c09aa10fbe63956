// src/config/sources.rs
//! Source list loading (JSON or TOML) and validation.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;
use crate::ingest::types::{Source, SourceKind};

pub const ENV_SOURCES_PATH: &str = "AWARDS_SOURCES_PATH";

/// One entry as written on disk. Accepts both the legacy shape
/// (`rss` / `url` / `type` / `affects_nom`) and the explicit one
/// (`kind` / `location` / `classification` / `affects_nomination`).
#[derive(Debug, Deserialize)]
struct SourceRecord {
    name: String,
    #[serde(default)]
    kind: Option<SourceKind>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    rss: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, alias = "type")]
    classification: String,
    #[serde(default, alias = "affects_nom")]
    affects_nomination: bool,
    #[serde(default)]
    affects_win: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SourcesDoc {
    List(Vec<SourceRecord>),
    Table { sources: Vec<SourceRecord> },
}

impl SourcesDoc {
    fn into_records(self) -> Vec<SourceRecord> {
        match self {
            SourcesDoc::List(v) => v,
            SourcesDoc::Table { sources } => sources,
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_location(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidLocation {
        name: name.to_string(),
        location: raw.to_string(),
    };
    let url = Url::parse(raw).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    Ok(url)
}

impl SourceRecord {
    fn into_source(self) -> Result<Source, ConfigError> {
        let name = self.name.trim().to_string();
        let rss = non_empty(self.rss);
        let page = non_empty(self.url);
        let explicit = non_empty(self.location);

        let (kind, location) = match self.kind {
            Some(SourceKind::Feed) => (SourceKind::Feed, explicit.or(rss).or(page)),
            Some(SourceKind::Listing) => (SourceKind::Listing, explicit.or(page)),
            None => match rss {
                Some(feed) => (SourceKind::Feed, Some(feed)),
                None => (SourceKind::Listing, explicit.or(page)),
            },
        };

        let location = location.unwrap_or_default();
        Ok(Source {
            location: parse_location(&name, &location)?,
            name,
            kind,
            classification: self.classification.trim().to_string(),
            affects_nomination: self.affects_nomination,
            affects_win: self.affects_win,
        })
    }
}

/// Reject lists the pipeline cannot run: empty, unnamed, duplicated or
/// non-http(s) sources.
pub fn validate_sources(sources: &[Source]) -> Result<(), ConfigError> {
    if sources.is_empty() {
        return Err(ConfigError::Empty);
    }
    let mut names = HashSet::new();
    for (index, s) in sources.iter().enumerate() {
        if s.name.trim().is_empty() {
            return Err(ConfigError::EmptyName { index });
        }
        if !names.insert(s.name.as_str()) {
            return Err(ConfigError::DuplicateName {
                name: s.name.clone(),
            });
        }
        if !matches!(s.location.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidLocation {
                name: s.name.clone(),
                location: s.location.to_string(),
            });
        }
    }
    Ok(())
}

/// Parse a source list. `hint_ext` picks the first format tried.
pub fn parse_sources(s: &str, hint_ext: &str) -> Result<Vec<Source>, ConfigError> {
    let doc = if hint_ext == "toml" {
        parse_toml(s).or_else(|toml_err| parse_json(s).map_err(|_| toml_err))?
    } else {
        parse_json(s).or_else(|json_err| parse_toml(s).map_err(|_| json_err))?
    };

    let sources = doc
        .into_records()
        .into_iter()
        .map(SourceRecord::into_source)
        .collect::<Result<Vec<_>, _>>()?;
    validate_sources(&sources)?;
    Ok(sources)
}

fn parse_toml(s: &str) -> Result<SourcesDoc, ConfigError> {
    toml::from_str(s).map_err(|e| ConfigError::Parse(format!("toml: {e}")))
}

fn parse_json(s: &str) -> Result<SourcesDoc, ConfigError> {
    serde_json::from_str(s).map_err(|e| ConfigError::Parse(format!("json: {e}")))
}

/// Load sources from an explicit path. Format follows the extension.
pub fn load_sources_from(path: &Path) -> Result<Vec<Source>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_sources(&content, ext.as_str())
}

/// Load sources using env var + fallbacks:
/// 1) $AWARDS_SOURCES_PATH
/// 2) sources.json
/// 3) config/sources.toml
/// 4) config/sources.json
pub fn load_sources_default() -> Result<Vec<Source>, ConfigError> {
    if let Ok(p) = std::env::var(ENV_SOURCES_PATH) {
        return load_sources_from(&PathBuf::from(p));
    }
    for candidate in ["sources.json", "config/sources.toml", "config/sources.json"] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return load_sources_from(&p);
        }
    }
    Err(ConfigError::Missing)
}
