//! Batch validation entry point.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use crate::config::ValidatorConfig;
use crate::error::{Result, ValidatorError};
use crate::ontology::{OlsClient, TermAuthority, TermCache, TermResolver};
use crate::relationship::{
    BioSamplesClient, GraphNode, RelationshipValidator, RemoteEntryCache, SampleRepository,
};
use crate::report::{aggregate, EvaluatedRecord, ValidationReport};
use crate::rules::{RuleSet, SampleKind};
use crate::sample::Record;
use crate::validation::FieldRuleEvaluator;

/// Cooperative cancellation flag shared between a caller and a running batch.
///
/// Records already being evaluated finish; records not yet started are
/// skipped and the run returns [`ValidatorError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Validates batches of sample records.
///
/// Holds the term and remote-entry caches across runs. Failed lookups are
/// dropped from both caches when a run starts, so a later run retries them;
/// successful answers are reused.
pub struct SampleValidator {
    config: ValidatorConfig,
    authority: Arc<dyn TermAuthority>,
    repository: Arc<dyn SampleRepository>,
    term_cache: Arc<TermCache>,
    remote_cache: Arc<RemoteEntryCache>,
    pool: ThreadPool,
}

impl SampleValidator {
    /// Create a validator talking to OLS and BioSamples.
    pub fn new(config: ValidatorConfig) -> Result<Self> {
        config.validate()?;
        let authority = OlsClient::with_base_url(&config.ols_base_url, config.request_timeout)?;
        let repository =
            BioSamplesClient::with_base_url(&config.biosamples_base_url, config.request_timeout)?;
        Self::with_services(config, Arc::new(authority), Arc::new(repository))
    }

    /// Create a validator with custom term authority and sample repository.
    pub fn with_services(
        config: ValidatorConfig,
        authority: Arc<dyn TermAuthority>,
        repository: Arc<dyn SampleRepository>,
    ) -> Result<Self> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.max_workers.unwrap_or(0))
            .thread_name(|i| format!("faang-worker-{}", i))
            .build()
            .map_err(|e| ValidatorError::Config(format!("Failed to create worker pool: {}", e)))?;

        Ok(Self {
            config,
            authority,
            repository,
            term_cache: Arc::new(TermCache::new()),
            remote_cache: Arc::new(RemoteEntryCache::new()),
            pool,
        })
    }

    /// Share a term cache with other validators.
    pub fn with_term_cache(mut self, cache: Arc<TermCache>) -> Self {
        self.term_cache = cache;
        self
    }

    /// Share a remote entry cache with other validators.
    pub fn with_remote_cache(mut self, cache: Arc<RemoteEntryCache>) -> Self {
        self.remote_cache = cache;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn term_cache(&self) -> &Arc<TermCache> {
        &self.term_cache
    }

    pub fn remote_cache(&self) -> &Arc<RemoteEntryCache> {
        &self.remote_cache
    }

    /// Validate a batch of records of one kind.
    pub fn validate(&self, kind: SampleKind, records: &[Record]) -> Result<ValidationReport> {
        self.validate_with_cancel(kind, records, &CancellationToken::new())
    }

    /// Validate a batch, stopping between records once `cancel` fires.
    pub fn validate_with_cancel(
        &self,
        kind: SampleKind,
        records: &[Record],
        cancel: &CancellationToken,
    ) -> Result<ValidationReport> {
        let rules = RuleSet::for_kind(kind);
        let total = records.len();
        info!("Validating {} {} records", total, kind);

        let cleared = self.term_cache.clear_failures() + self.remote_cache.clear_failures();
        if cleared > 0 {
            debug!("Cleared {} failed lookups from previous runs", cleared);
        }

        let resolver = TermResolver::with_cache(self.authority.clone(), self.term_cache.clone());
        let evaluator =
            FieldRuleEvaluator::new(resolver).with_ontology_checks(self.config.validate_ontologies);

        let evaluated: Vec<Option<EvaluatedRecord>> = self.pool.install(|| {
            records
                .par_iter()
                .enumerate()
                .map(|(index, record)| {
                    if cancel.is_cancelled() {
                        return None;
                    }
                    let outcome = evaluator.evaluate(record, rules);
                    Some(EvaluatedRecord {
                        index,
                        identifier: record.identifier(index),
                        record: record.clone(),
                        outcome,
                    })
                })
                .collect()
        });

        if cancel.is_cancelled() {
            let completed = evaluated.iter().filter(|e| e.is_some()).count();
            info!("Validation cancelled after {} of {} records", completed, total);
            return Err(ValidatorError::Cancelled { completed, total });
        }
        let evaluated: Vec<EvaluatedRecord> = evaluated.into_iter().flatten().collect();
        debug!("Evaluated {} records, {} term lookups cached", evaluated.len(), self.term_cache.len());

        let relationships = if self.config.validate_relationships && rules.relationship.is_some() {
            let nodes: Vec<GraphNode> = evaluated
                .iter()
                .filter(|e| e.outcome.is_valid())
                .map(|e| GraphNode::new(e.index, e.identifier.clone(), &e.record))
                .collect();
            let graph = RelationshipValidator::with_cache(self.repository.clone(), self.remote_cache.clone());
            self.pool.install(|| graph.validate(&nodes, rules))
        } else {
            BTreeMap::new()
        };

        let report = aggregate(rules, evaluated, &relationships);
        info!(
            "{} {} records: {} valid, {} invalid, {} with relationship findings",
            report.summary.total,
            kind,
            report.summary.valid,
            report.summary.invalid,
            report.summary.relationship_errors
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupFailure;
    use crate::ontology::MockTermAuthority;
    use crate::relationship::MockSampleRepository;

    fn validator(authority: Arc<MockTermAuthority>) -> SampleValidator {
        SampleValidator::with_services(
            ValidatorConfig::default().with_max_workers(2),
            authority,
            Arc::new(MockSampleRepository::new()),
        )
        .unwrap()
    }

    fn animal(name: &str, sex_term: &str) -> Record {
        Record::new()
            .with_field("Sample Name", name)
            .with_field("Material", "organism")
            .with_field("Term Source ID", "OBI_0100026")
            .with_field("Project", "FAANG")
            .with_field("Organism", "Sus scrofa")
            .with_field("Organism Term Source ID", "NCBITaxon_9823")
            .with_field("Sex", "female")
            .with_field("Sex Term Source ID", sex_term)
    }

    #[test]
    fn test_cancelled_before_start() {
        let validator = validator(Arc::new(MockTermAuthority::with_livestock_terms()));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = validator.validate_with_cancel(SampleKind::Organism, &[animal("A", "PATO_0000383")], &cancel);
        assert!(matches!(
            result,
            Err(ValidatorError::Cancelled { completed: 0, total: 1 })
        ));
    }

    #[test]
    fn test_failed_lookups_are_retried_next_run() {
        let failing = Arc::new(
            MockTermAuthority::with_livestock_terms().with_failure("PATO:0000383", LookupFailure::Timeout),
        );
        let first = validator(failing.clone());
        let records = vec![animal("A", "PATO_0000383"), animal("B", "PATO:0000383")];

        let report = first.validate(SampleKind::Organism, &records).unwrap();
        assert_eq!(report.summary.invalid, 2);
        assert_eq!(failing.lookups_for("PATO:0000383"), 1);

        first.validate(SampleKind::Organism, &records).unwrap();
        assert_eq!(failing.lookups_for("PATO:0000383"), 2);
        // Successful answers stay cached.
        assert_eq!(failing.lookups_for("NCBITaxon:9823"), 1);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let result = SampleValidator::with_services(
            ValidatorConfig::default().with_max_workers(0),
            Arc::new(MockTermAuthority::new()),
            Arc::new(MockSampleRepository::new()),
        );
        assert!(matches!(result, Err(ValidatorError::Config(_))));
    }

    #[test]
    fn test_relationships_can_be_disabled() {
        let repository = Arc::new(MockSampleRepository::new());
        let validator = SampleValidator::with_services(
            ValidatorConfig::default().with_relationships(false),
            Arc::new(MockTermAuthority::with_livestock_terms()),
            repository.clone(),
        )
        .unwrap();
        let record = animal("A", "PATO_0000383").with_field("Child Of", vec!["SAMEA404"]);
        let report = validator.validate(SampleKind::Organism, &[record]).unwrap();
        assert!(report.valid[0].relationship_errors.is_empty());
        assert_eq!(repository.fetch_count(), 0);
    }
}
