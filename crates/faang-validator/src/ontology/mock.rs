//! In-memory term authority for tests and offline runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::lookup::{LookupFailure, LookupResult};

use super::authority::TermAuthority;
use super::term::{normalize_term, TermCandidate, TermId, TermRecord};

/// Term authority backed by a fixed table, counting every lookup.
pub struct MockTermAuthority {
    terms: HashMap<String, TermRecord>,
    failures: HashMap<String, LookupFailure>,
    calls: AtomicUsize,
    per_term: Mutex<HashMap<String, usize>>,
}

impl MockTermAuthority {
    /// Create an authority that knows no terms.
    pub fn new() -> Self {
        Self {
            terms: HashMap::new(),
            failures: HashMap::new(),
            calls: AtomicUsize::new(0),
            per_term: Mutex::new(HashMap::new()),
        }
    }

    /// Create an authority preloaded with common livestock terms.
    pub fn with_livestock_terms() -> Self {
        Self::new()
            .with_term("NCBITaxon:9913", "Bos taurus", "ncbitaxon", &["NCBITaxon:9903"])
            .with_term("NCBITaxon:9823", "Sus scrofa", "ncbitaxon", &["NCBITaxon:9822"])
            .with_term("NCBITaxon:9031", "Gallus gallus", "ncbitaxon", &["NCBITaxon:9030"])
            .with_term("NCBITaxon:9940", "Ovis aries", "ncbitaxon", &["NCBITaxon:9935"])
            .with_term("NCBITaxon:9796", "Equus caballus", "ncbitaxon", &["NCBITaxon:9789"])
            .with_term("PATO:0000384", "male", "pato", &["PATO:0000047", "PATO:0000001"])
            .with_term("PATO:0000383", "female", "pato", &["PATO:0000047", "PATO:0000001"])
            .with_term("PATO:0000461", "normal", "pato", &["PATO:0000001"])
            .with_term("EFO:0000408", "disease", "efo", &["EFO:0000001"])
            .with_term("EFO:0005741", "infectious disease", "efo", &["EFO:0000408"])
            .with_term("LBO:0000156", "Holstein", "lbo", &["LBO:0000001", "LBO:0000000"])
            .with_term("LBO:0000358", "Large White", "lbo", &["LBO:0000003", "LBO:0000000"])
            .with_term("LBO:0000011", "Thoroughbred", "lbo", &["LBO:0000713", "LBO:0000000"])
            .with_term("UBERON:0000160", "intestine", "uberon", &["UBERON:0001007"])
            .with_term("UBERON:0002107", "liver", "uberon", &["UBERON:0002423"])
    }

    /// Register a term with one label and its ancestors.
    pub fn with_term(mut self, id: &str, label: &str, ontology: &str, ancestors: &[&str]) -> Self {
        let key = normalize_term(id);
        let record = self.terms.entry(key).or_default();
        record.candidates.push(TermCandidate::new(label, ontology));
        for ancestor in ancestors {
            let ancestor = normalize_term(ancestor);
            if !record.ancestors.contains(&ancestor) {
                record.ancestors.push(ancestor);
            }
        }
        self
    }

    /// Make lookups of `id` fail.
    pub fn with_failure(mut self, id: &str, failure: LookupFailure) -> Self {
        self.failures.insert(normalize_term(id), failure);
        self
    }

    /// Total lookups served.
    pub fn lookup_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Lookups served for one term.
    pub fn lookups_for(&self, id: &str) -> usize {
        let per_term = self.per_term.lock().unwrap_or_else(|e| e.into_inner());
        per_term.get(&normalize_term(id)).copied().unwrap_or(0)
    }
}

impl Default for MockTermAuthority {
    fn default() -> Self {
        Self::new()
    }
}

impl TermAuthority for MockTermAuthority {
    fn lookup(&self, term: &TermId) -> LookupResult<TermRecord> {
        let key = term.canonical();
        self.calls.fetch_add(1, Ordering::SeqCst);
        {
            let mut per_term = self.per_term.lock().unwrap_or_else(|e| e.into_inner());
            *per_term.entry(key.clone()).or_default() += 1;
        }

        if let Some(failure) = self.failures.get(&key) {
            return Err(failure.clone());
        }
        self.terms.get(&key).cloned().ok_or(LookupFailure::NotFound)
    }

    fn name(&self) -> &str {
        "OLS"
    }
}
