//! FAANG sample metadata validation.
//!
//! Validates batches of sample records (organisms, organoids, teleost
//! embryos) against per-kind rule tables, resolves controlled-vocabulary
//! terms through an ontology service, checks parent references between
//! samples and assembles a report.
//!
//! # Core Principles
//!
//! - **Findings are data**: rule violations land in a [`ValidationOutcome`],
//!   never in an `Err`
//! - **One lookup per term**: term and remote-sample answers are cached and
//!   shared across worker threads
//! - **Relationships are advisory**: parent-reference findings are reported
//!   but never invalidate a record
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use faang_validator::{
//!     MockSampleRepository, MockTermAuthority, Record, SampleKind, SampleValidator,
//!     ValidatorConfig,
//! };
//!
//! let validator = SampleValidator::with_services(
//!     ValidatorConfig::default(),
//!     Arc::new(MockTermAuthority::with_livestock_terms()),
//!     Arc::new(MockSampleRepository::new()),
//! )
//! .unwrap();
//!
//! let record = Record::new()
//!     .with_field("Sample Name", "PIG_1")
//!     .with_field("Material", "organism")
//!     .with_field("Term Source ID", "OBI_0100026")
//!     .with_field("Project", "FAANG")
//!     .with_field("Organism", "Sus scrofa")
//!     .with_field("Organism Term Source ID", "NCBITaxon_9823")
//!     .with_field("Sex", "female");
//!
//! let report = validator.validate(SampleKind::Organism, &[record]).unwrap();
//! assert_eq!(report.summary.invalid, 1);
//! println!("{}", report.to_text());
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod lookup;
pub mod ontology;
pub mod relationship;
pub mod report;
pub mod rules;
pub mod sample;
pub mod validation;

mod validator;

pub use crate::validator::{CancellationToken, SampleValidator};
pub use config::ValidatorConfig;
pub use error::{Result, ValidatorError};
pub use input::{Batch, BatchLoader, SourceMetadata};
pub use lookup::{LookupCache, LookupFailure, LookupResult};
pub use ontology::{MockTermAuthority, OlsClient, TermAuthority, TermResolver};
pub use relationship::{BioSamplesClient, MockSampleRepository, RelationshipValidator, SampleRepository};
pub use report::{aggregate, ErrorRow, FieldAliasTable, ValidationReport};
pub use rules::{RuleSet, SampleKind};
pub use sample::{FieldValue, Identifier, Record};
pub use validation::{ErrorClass, FieldError, FieldRuleEvaluator, ValidationOutcome};
