//! Cross-record parent reference checks.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::lookup::LookupFailure;
use crate::rules::RuleSet;
use crate::sample::{Identifier, Record};
use crate::validation::{ErrorClass, ValidationOutcome};

use super::repository::{is_remote_id, RemoteEntryCache, SampleRepository};

/// A schema-valid record taking part in relationship checks.
#[derive(Debug, Clone)]
pub struct GraphNode<'a> {
    /// Position in the input batch.
    pub index: usize,
    pub identifier: Identifier,
    pub record: &'a Record,
}

impl<'a> GraphNode<'a> {
    pub fn new(index: usize, identifier: Identifier, record: &'a Record) -> Self {
        Self {
            index,
            identifier,
            record,
        }
    }
}

/// What is known about a referenced parent.
struct ParentView {
    species: Option<String>,
    material: Option<String>,
    /// The parent's own parents, when it is a local record.
    local_parents: Option<Vec<String>>,
}

/// Checks parent references within a batch and against the remote repository.
///
/// Only the direct back-edge (A lists B, B lists A) is reported as a cycle;
/// longer cycles pass.
pub struct RelationshipValidator {
    repository: Arc<dyn SampleRepository>,
    cache: Arc<RemoteEntryCache>,
}

impl RelationshipValidator {
    /// Create a validator with its own empty cache.
    pub fn new(repository: Arc<dyn SampleRepository>) -> Self {
        Self::with_cache(repository, Arc::new(RemoteEntryCache::new()))
    }

    /// Create a validator sharing an existing cache.
    pub fn with_cache(repository: Arc<dyn SampleRepository>, cache: Arc<RemoteEntryCache>) -> Self {
        Self { repository, cache }
    }

    /// The cache in use.
    pub fn cache(&self) -> &Arc<RemoteEntryCache> {
        &self.cache
    }

    /// Fetch every accession once, in parallel. Failures are logged and kept
    /// in the cache so dependent checks see them.
    pub fn prefetch(&self, accessions: &BTreeSet<String>) {
        if accessions.is_empty() {
            return;
        }
        debug!(
            "Prefetching {} remote samples from {}",
            accessions.len(),
            self.repository.name()
        );
        accessions.par_iter().for_each(|accession| {
            let result = self
                .cache
                .get_or_fetch(accession, || self.repository.fetch(accession));
            if let Err(failure) = result {
                warn!(
                    "Could not fetch {} from {}: {}",
                    accession,
                    self.repository.name(),
                    failure
                );
            }
        });
    }

    /// Check every node's parent references.
    ///
    /// Returns outcomes keyed by batch position, only for nodes with
    /// findings. Records sharing a name keep separate outcomes.
    pub fn validate(&self, nodes: &[GraphNode<'_>], rules: &RuleSet) -> BTreeMap<usize, ValidationOutcome> {
        let mut results = BTreeMap::new();
        let Some(link) = rules.relationship else {
            return results;
        };
        let column = rules.column(link.field);
        let species_column = link.species_field.map(|f| rules.column(f));

        let local: HashMap<&str, &Record> = nodes
            .iter()
            .filter_map(|n| n.identifier.name().map(|name| (name, n.record)))
            .collect();

        let remote: BTreeSet<String> = nodes
            .iter()
            .flat_map(|n| n.record.references(column))
            .filter(|r| is_remote_id(r) && !local.contains_key(r.as_str()))
            .collect();
        self.prefetch(&remote);

        let allowed = link.allowed_parent_materials;
        let condition = allowed.join(" or ");

        for node in nodes {
            let mut outcome = ValidationOutcome::new();
            let child_species = species_column.and_then(|c| node.record.text(c));

            for parent_id in node.record.references(column) {
                let parent = match local.get(parent_id.as_str()) {
                    Some(record) => ParentView {
                        species: species_column.and_then(|c| record.text(c)),
                        material: Some(rules.kind.material().to_string()),
                        local_parents: Some(record.references(column)),
                    },
                    None => match self.remote_parent(&parent_id) {
                        Ok(view) => view,
                        Err(failure) => {
                            let message = if failure.is_not_found() {
                                format!("Relationships part: no entity '{}' found", parent_id)
                            } else {
                                format!(
                                    "Relationships part: no entity '{}' found (lookup failed: {})",
                                    parent_id, failure
                                )
                            };
                            outcome.push_error(link.field, ErrorClass::Relationship, message);
                            continue;
                        }
                    },
                };

                if let (Some(child), Some(parent_species)) = (&child_species, &parent.species) {
                    if child != parent_species {
                        outcome.push_error(
                            link.field,
                            ErrorClass::Relationship,
                            format!(
                                "Relationships part: the specie of the child '{}' doesn't match the specie of the parent '{}'",
                                child, parent_species
                            ),
                        );
                    }
                }

                if let Some(material) = parent.material.as_deref().map(str::to_lowercase) {
                    if !material.is_empty() && !allowed.contains(&material.as_str()) {
                        outcome.push_error(
                            link.field,
                            ErrorClass::Relationship,
                            format!(
                                "Relationships part: referenced entity '{}' does not match condition 'should be {}'",
                                parent_id, condition
                            ),
                        );
                    }
                }

                if let (Some(grandparents), Some(name)) = (&parent.local_parents, node.identifier.name()) {
                    if grandparents.iter().any(|g| g == name) {
                        outcome.push_error(
                            link.field,
                            ErrorClass::Relationship,
                            format!(
                                "Relationships part: parent '{}' is listing the child as its parent",
                                parent_id
                            ),
                        );
                    }
                }
            }

            if !outcome.is_valid() {
                results.insert(node.index, outcome);
            }
        }

        results
    }

    /// Remote parent from the cache. References without the accession prefix
    /// are never fetched and so read as not found.
    fn remote_parent(&self, parent_id: &str) -> Result<ParentView, LookupFailure> {
        let entry = self.cache.get(parent_id).unwrap_or(Err(LookupFailure::NotFound))?;
        Ok(ParentView {
            species: entry.organism.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            material: entry.material,
            local_parents: None,
        })
    }
}
