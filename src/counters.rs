//! Persisted win counters.
//!
//! A narrow string-keyed numeric store, injected into the session
//! controller as a collaborator rather than reached for ad hoc from each
//! game. Reads treat an absent or garbled value as 0; increments are
//! read-then-write with no atomicity beyond single-threaded access.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// String-keyed numeric counter store.
pub trait CounterStore {
    /// The stored count; 0 when the key is absent or unreadable.
    fn get(&self, key: &str) -> u64;

    /// True when a value has been stored under the key. Distinguishes a
    /// stored 0 from a key never written.
    fn contains(&self, key: &str) -> bool;

    fn set(&mut self, key: &str, value: u64);

    /// Read-then-write increment; returns the new total.
    fn increment(&mut self, key: &str) -> u64 {
        let total = self.get(key) + 1;
        self.set(key, total);
        total
    }
}

/// In-memory store; counts live only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryCounters {
    values: HashMap<String, u64>,
}

impl MemoryCounters {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for MemoryCounters {
    fn get(&self, key: &str) -> u64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn set(&mut self, key: &str, value: u64) {
        self.values.insert(key.to_string(), value);
    }
}

/// JSON-file-backed store, written through on every mutation.
///
/// An unreadable or malformed file is treated as empty rather than an
/// error, and write failures are logged and swallowed: losing a win count
/// never disturbs the move-handling core.
#[derive(Debug, Clone)]
pub struct FileCounters {
    path: PathBuf,
    values: HashMap<String, u64>,
}

impl FileCounters {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "counter file unreadable, starting empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        FileCounters { path, values }
    }

    fn persist(&self) {
        let text = match serde_json::to_string_pretty(&self.values) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "counter serialization failed");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, text) {
            tracing::warn!(path = %self.path.display(), %err, "counter write failed");
        }
    }
}

impl CounterStore for FileCounters {
    fn get(&self, key: &str) -> u64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn set(&mut self, key: &str, value: u64) {
        self.values.insert(key.to_string(), value);
        self.persist();
    }
}
