//! Search History Store
//!
//! Ordered, capacity-bounded, de-duplicated list of past queries,
//! most recent first, persisted as a JSON string array after every
//! mutation. Loading tolerates a missing or corrupt blob by starting
//! empty; a failed write leaves the in-memory list authoritative and
//! surfaces a warning instead of an error.
//!
//! One store instance owns one storage path. Two instances pointed at
//! the same path race with last-write-wins semantics; that is an
//! accepted limitation of the blocking small-blob persistence model.

use crate::error::{Result, SearchPadError};
use crate::logging;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default number of retained queries
pub const DEFAULT_CAPACITY: usize = 20;

// ============================================================================
// Normalization
// ============================================================================

/// Whitespace handling applied to a query before it is recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhitespacePolicy {
    /// Strip every whitespace character, edge and internal
    #[default]
    RemoveAll,
    /// Trim leading and trailing whitespace only
    TrimEdges,
    /// Record the text verbatim
    Keep,
}

impl WhitespacePolicy {
    /// Normalize a raw query
    pub fn normalize(&self, text: &str) -> String {
        match self {
            WhitespacePolicy::RemoveAll => text.chars().filter(|c| !c.is_whitespace()).collect(),
            WhitespacePolicy::TrimEdges => text.trim().to_string(),
            WhitespacePolicy::Keep => text.to_string(),
        }
    }
}

// ============================================================================
// History Store
// ============================================================================

/// Result of a history mutation: the new ordering plus an optional
/// persistence warning. The entries are always correct for the current
/// process even when the warning is set.
#[derive(Debug)]
pub struct HistoryUpdate {
    /// Ordered snapshot after the mutation, most recent first
    pub entries: Vec<String>,
    /// Set when the synchronous persist failed
    pub persist_warning: Option<SearchPadError>,
}

/// Bounded, persisted store of past search queries
#[derive(Debug)]
pub struct SearchHistoryStore {
    entries: Vec<String>,
    capacity: usize,
    whitespace: WhitespacePolicy,
    path: PathBuf,
}

impl SearchHistoryStore {
    /// Open a store backed by `path`, loading whatever valid history is
    /// already there. A missing blob starts empty; an unreadable or
    /// corrupt blob also starts empty and logs a warning.
    pub fn open(
        path: impl Into<PathBuf>,
        capacity: usize,
        whitespace: WhitespacePolicy,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(SearchPadError::InvalidCapacity(capacity));
        }
        let path = path.into();
        let mut store = Self {
            entries: Vec::new(),
            capacity,
            whitespace,
            path,
        };
        store.entries = store.load();
        store.entries.truncate(store.capacity);
        Ok(store)
    }

    /// Open with the default capacity and whitespace policy
    pub fn open_default(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(path, DEFAULT_CAPACITY, WhitespacePolicy::default())
    }

    /// Record a confirmed query.
    ///
    /// The text is normalized first; an empty result is a no-op, not an
    /// error. An existing exact match moves to the front instead of
    /// duplicating. The list is truncated to capacity from the tail and
    /// persisted synchronously.
    pub fn record_query(&mut self, text: &str) -> HistoryUpdate {
        let normalized = self.whitespace.normalize(text);
        if normalized.is_empty() {
            return self.unchanged();
        }

        self.entries.retain(|e| *e != normalized);
        self.entries.insert(0, normalized);
        self.entries.truncate(self.capacity);
        self.updated()
    }

    /// Remove one entry by exact text, if present
    pub fn remove_query(&mut self, text: &str) -> HistoryUpdate {
        let normalized = self.whitespace.normalize(text);
        let before = self.entries.len();
        self.entries.retain(|e| *e != normalized);
        if self.entries.len() == before {
            return self.unchanged();
        }
        self.updated()
    }

    /// Read-only snapshot, most recent first
    pub fn current_history(&self) -> &[String] {
        &self.entries
    }

    /// Empty the history and overwrite the persisted blob
    pub fn clear(&mut self) -> HistoryUpdate {
        self.entries.clear();
        self.updated()
    }

    /// Change the retention capacity.
    ///
    /// Shrinking below the current length truncates from the tail and
    /// persists immediately.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<HistoryUpdate> {
        if capacity == 0 {
            return Err(SearchPadError::InvalidCapacity(capacity));
        }
        self.capacity = capacity;
        if self.entries.len() > capacity {
            self.entries.truncate(capacity);
            Ok(self.updated())
        } else {
            Ok(self.unchanged())
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Storage path this store owns
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unchanged(&self) -> HistoryUpdate {
        HistoryUpdate {
            entries: self.entries.clone(),
            persist_warning: None,
        }
    }

    fn updated(&mut self) -> HistoryUpdate {
        let persist_warning = self.persist().err();
        if let Some(ref warning) = persist_warning {
            logging::warn("HISTORY", &warning.to_string());
        }
        HistoryUpdate {
            entries: self.entries.clone(),
            persist_warning,
        }
    }

    /// Load the persisted blob, degrading to empty on any failure
    fn load(&self) -> Vec<String> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                let warning = SearchPadError::PersistenceRead {
                    path: self.path.clone(),
                    source: e,
                };
                logging::warn("HISTORY", &warning.to_string());
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<String>>(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                let warning = SearchPadError::CorruptBlob {
                    path: self.path.clone(),
                    source: e,
                };
                logging::warn("HISTORY", &warning.to_string());
                Vec::new()
            }
        }
    }

    /// Serialize and write the blob in place
    fn persist(&self) -> Result<()> {
        let blob = serde_json::to_vec(&self.entries)?;
        fs::write(&self.path, blob).map_err(|e| SearchPadError::PersistenceWrite {
            path: self.path.clone(),
            source: e,
        })
    }
}
