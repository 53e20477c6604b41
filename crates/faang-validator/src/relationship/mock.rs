//! In-memory sample repository for tests and offline runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crate::lookup::{LookupFailure, LookupResult};

use super::repository::{RemoteEntry, SampleRepository};

/// Repository backed by a fixed table, counting every fetch.
pub struct MockSampleRepository {
    entries: HashMap<String, RemoteEntry>,
    failures: HashMap<String, LookupFailure>,
    latency: Option<Duration>,
    calls: AtomicUsize,
    per_id: Mutex<HashMap<String, usize>>,
}

impl MockSampleRepository {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            failures: HashMap::new(),
            latency: None,
            calls: AtomicUsize::new(0),
            per_id: Mutex::new(HashMap::new()),
        }
    }

    /// Register an entry.
    pub fn with_entry(mut self, entry: RemoteEntry) -> Self {
        self.entries.insert(entry.accession.clone(), entry);
        self
    }

    /// Make fetches of `accession` fail.
    pub fn with_failure(mut self, accession: &str, failure: LookupFailure) -> Self {
        self.failures.insert(accession.to_string(), failure);
        self
    }

    /// Delay every fetch, to widen race windows in concurrency tests.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Total fetches served.
    pub fn fetch_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Fetches served for one accession.
    pub fn fetches_for(&self, accession: &str) -> usize {
        let per_id = self.per_id.lock().unwrap_or_else(|e| e.into_inner());
        per_id.get(accession).copied().unwrap_or(0)
    }
}

impl Default for MockSampleRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleRepository for MockSampleRepository {
    fn fetch(&self, accession: &str) -> LookupResult<RemoteEntry> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        {
            let mut per_id = self.per_id.lock().unwrap_or_else(|e| e.into_inner());
            *per_id.entry(accession.to_string()).or_default() += 1;
        }
        if let Some(latency) = self.latency {
            thread::sleep(latency);
        }

        if let Some(failure) = self.failures.get(accession) {
            return Err(failure.clone());
        }
        self.entries
            .get(accession)
            .cloned()
            .ok_or(LookupFailure::NotFound)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_and_count() {
        let repository = MockSampleRepository::new()
            .with_entry(RemoteEntry::new("SAMEA1").with_organism("Bos taurus"))
            .with_failure("SAMEA2", LookupFailure::Timeout);

        assert_eq!(
            repository.fetch("SAMEA1").unwrap().organism.as_deref(),
            Some("Bos taurus")
        );
        assert_eq!(repository.fetch("SAMEA2"), Err(LookupFailure::Timeout));
        assert_eq!(repository.fetch("SAMEA3"), Err(LookupFailure::NotFound));
        assert_eq!(repository.fetch_count(), 3);
        assert_eq!(repository.fetches_for("SAMEA1"), 1);
    }
}
