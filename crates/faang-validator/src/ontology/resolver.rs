//! Term resolution with a shared, de-duplicating cache.

use std::sync::Arc;

use tracing::debug;

use crate::lookup::{LookupCache, LookupFailure};
use crate::sample::RESTRICTED_ACCESS;

use super::authority::TermAuthority;
use super::term::{TermId, TermRecord, TermResolution};

/// Cache of authority answers keyed by canonical term id.
pub type TermCache = LookupCache<TermRecord>;

/// Resolves term ids against a [`TermAuthority`], memoizing every answer.
#[derive(Clone)]
pub struct TermResolver {
    authority: Arc<dyn TermAuthority>,
    cache: Arc<TermCache>,
}

impl TermResolver {
    /// Create a resolver with its own empty cache.
    pub fn new(authority: Arc<dyn TermAuthority>) -> Self {
        Self::with_cache(authority, Arc::new(TermCache::new()))
    }

    /// Create a resolver sharing an existing cache.
    pub fn with_cache(authority: Arc<dyn TermAuthority>, cache: Arc<TermCache>) -> Self {
        Self { authority, cache }
    }

    /// The cache in use.
    pub fn cache(&self) -> &Arc<TermCache> {
        &self.cache
    }

    /// Authority record for a term, fetched at most once per cache.
    pub fn record(&self, term: &TermId) -> Result<TermRecord, LookupFailure> {
        let key = term.canonical();
        if self.cache.contains(&key) {
            debug!("Term cache hit for {}", key);
        }
        self.cache.get_or_fetch(&key, || {
            debug!("Looking up {} in {}", key, self.authority.name());
            self.authority.lookup(term)
        })
    }

    /// Resolve `raw`, checking it against `allowed_classes` and comparing its
    /// labels from `vocabulary` with `expected_label`.
    ///
    /// An allowed class without a separator (`NCBITaxon`) admits every term
    /// of that namespace; otherwise the term must be the class itself or
    /// list it among its ancestors. A label mismatch is only a warning.
    pub fn resolve(
        &self,
        raw: &str,
        vocabulary: &str,
        allowed_classes: &[&str],
        expected_label: Option<&str>,
    ) -> TermResolution {
        let raw = raw.trim();
        if raw == RESTRICTED_ACCESS {
            let mut resolution = TermResolution::new(raw);
            resolution.found = true;
            return resolution;
        }

        let Some(term) = TermId::parse(raw) else {
            let mut resolution = TermResolution::new(raw);
            resolution
                .errors
                .push(format!("Term '{}' is not a valid ontology term identifier", raw));
            return resolution;
        };

        let mut resolution = TermResolution::new(term.canonical());
        let record = match self.record(&term) {
            Ok(record) => record,
            Err(LookupFailure::NotFound) => {
                resolution.errors.push(format!(
                    "Term {} not found in {}",
                    term,
                    self.authority.name()
                ));
                return resolution;
            }
            Err(failure) => {
                resolution.errors.push(format!(
                    "Term {} could not be resolved in {}: {}",
                    term,
                    self.authority.name(),
                    failure
                ));
                return resolution;
            }
        };

        resolution.found = true;
        let labels = record.labels_for(vocabulary);
        resolution.matched_label = labels.first().map(|l| l.to_string());

        if !allowed_classes.is_empty()
            && !allowed_classes
                .iter()
                .any(|class| class_admits(class, &term, &record))
        {
            resolution.errors.push(format!(
                "Term {} is not a descendant of any allowed class ({})",
                term,
                allowed_classes.join(", ")
            ));
        }

        if let Some(expected) = expected_label.map(str::trim).filter(|l| !l.is_empty()) {
            if !labels.iter().any(|l| l.eq_ignore_ascii_case(expected)) {
                resolution.warnings.push(format!(
                    "Provided value '{}' doesn't precisely match '{}' for term '{}'",
                    expected,
                    resolution.matched_label.as_deref().unwrap_or("unknown"),
                    term
                ));
            }
        }

        resolution
    }
}

fn class_admits(class: &str, term: &TermId, record: &TermRecord) -> bool {
    match TermId::parse(class) {
        Some(class_id) => class_id == *term || record.has_ancestor(&class_id.canonical()),
        None => term.in_namespace(class.trim()),
    }
}
