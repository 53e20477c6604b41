//! Shared plumbing for external lookups: failure taxonomy and a
//! de-duplicating result cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an external lookup produced no answer.
///
/// All variants block the record they affect; the distinction only changes
/// the message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum LookupFailure {
    /// The authority answered and does not know the id.
    #[error("not found")]
    NotFound,
    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,
    /// Connection or HTTP-level failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// The response could not be understood.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl LookupFailure {
    /// Classify a reqwest error.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupFailure::Timeout
        } else if err.is_decode() {
            LookupFailure::Malformed(err.to_string())
        } else if err.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            LookupFailure::NotFound
        } else {
            LookupFailure::Transport(err.to_string())
        }
    }

    /// Whether this is the authoritative "unknown id" answer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupFailure::NotFound)
    }
}

/// Result of one external lookup.
pub type LookupResult<T> = std::result::Result<T, LookupFailure>;

/// Cache of lookup results keyed by id.
///
/// At most one fetch runs per key: concurrent callers for the same key block
/// on the same cell and observe the value once it is published. Successful
/// results are kept for the life of the cache; failures are kept until
/// [`clear_failures`](Self::clear_failures) so a later run can retry them.
pub struct LookupCache<T> {
    entries: Mutex<HashMap<String, Arc<OnceCell<LookupResult<T>>>>>,
}

impl<T: Clone> LookupCache<T> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached result for `key`, running `fetch` if none exists.
    pub fn get_or_fetch<F>(&self, key: &str, fetch: F) -> LookupResult<T>
    where
        F: FnOnce() -> LookupResult<T>,
    {
        let cell = {
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(entries.entry(key.to_string()).or_default())
        };
        cell.get_or_init(fetch).clone()
    }

    /// Published result for `key`, if any.
    pub fn get(&self, key: &str) -> Option<LookupResult<T>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Whether a result for `key` has been published.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of published results.
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.values().filter(|cell| cell.get().is_some()).count()
    }

    /// Whether nothing has been published.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop cached failures, keeping successful results.
    pub fn clear_failures(&self) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, cell| matches!(cell.get(), Some(Ok(_))));
        before - entries.len()
    }
}

impl<T: Clone> Default for LookupCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
