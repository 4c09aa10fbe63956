// src/seen.rs
//! Stable item identity and the persisted set of already-surfaced items.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use crate::error::PersistenceError;

pub const DEFAULT_STATE_PATH: &str = "state_seen.json";

/// Hex characters kept from the SHA-256 digest.
pub const STABLE_ID_LEN: usize = 24;

/// Fingerprint of `(url, title)`, both trimmed, order-sensitive.
pub fn stable_id(url: &str, title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.trim().as_bytes());
    hasher.update(b"|");
    hasher.update(title.trim().as_bytes());
    let digest = hasher.finalize();

    let mut out = String::with_capacity(STABLE_ID_LEN);
    for b in digest.iter().take(STABLE_ID_LEN / 2) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Identifiers already shown in a previous run. Sorted so saves diff cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    ids: BTreeSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl FromIterator<String> for SeenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Durable storage for the seen-set.
pub trait SeenRepository: Send + Sync {
    /// A store that has never been written yields an empty set.
    fn load(&self) -> Result<SeenSet, PersistenceError>;
    fn persist(&self, seen: &SeenSet) -> Result<(), PersistenceError>;
}

/// JSON array of ids on disk, two-space indented, sorted.
#[derive(Debug, Clone)]
pub struct FileSeenRepository {
    path: PathBuf,
}

impl FileSeenRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeenRepository for FileSeenRepository {
    fn load(&self) -> Result<SeenSet, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(SeenSet::new()),
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let ids: Vec<String> =
            serde_json::from_str(&content).map_err(|source| PersistenceError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        Ok(ids.into_iter().collect())
    }

    fn persist(&self, seen: &SeenSet) -> Result<(), PersistenceError> {
        let write_err = |source: std::io::Error| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };

        let ids: Vec<&str> = seen.iter().collect();
        let body = serde_json::to_string_pretty(&ids)
            .map_err(|e| write_err(std::io::Error::other(e)))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_err)?;
        }

        // Write-then-rename so an interrupted save never truncates the state file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }
}

/// In-process store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySeenRepository {
    inner: Mutex<SeenSet>,
}

impl MemorySeenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids<I: IntoIterator<Item = String>>(ids: I) -> Self {
        Self {
            inner: Mutex::new(ids.into_iter().collect()),
        }
    }

    pub fn snapshot(&self) -> SeenSet {
        self.inner.lock().expect("seen mutex poisoned").clone()
    }
}

impl SeenRepository for MemorySeenRepository {
    fn load(&self) -> Result<SeenSet, PersistenceError> {
        Ok(self.snapshot())
    }

    fn persist(&self, seen: &SeenSet) -> Result<(), PersistenceError> {
        *self.inner.lock().expect("seen mutex poisoned") = seen.clone();
        Ok(())
    }
}

/// Run-scoped view of the seen-set. Only records new ids in mark-seen mode,
/// so without it the same items keep showing up for review.
#[derive(Debug, Clone)]
pub struct DedupTracker {
    seen: SeenSet,
    mark_seen: bool,
}

impl DedupTracker {
    pub fn new(seen: SeenSet, mark_seen: bool) -> Self {
        Self { seen, mark_seen }
    }

    pub fn is_seen(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Returns true when the id was newly recorded.
    pub fn mark_seen(&mut self, id: &str) -> bool {
        if !self.mark_seen {
            return false;
        }
        self.seen.insert(id)
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    pub fn into_seen(self) -> SeenSet {
        self.seen
    }
}
