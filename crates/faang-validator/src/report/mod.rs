//! Batch report assembly and export.
//!
//! [`aggregate`] turns per-record outcomes and relationship findings into a
//! [`ValidationReport`]. Records are partitioned on their own errors only:
//! relationship findings are attached to valid records but never move them
//! to the invalid side.

mod alias;
mod text;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidatorError};
use crate::input::SourceMetadata;
use crate::rules::{RuleSet, SampleKind};
use crate::sample::{Identifier, Record};
use crate::validation::ValidationOutcome;

pub use alias::FieldAliasTable;

/// One record after field rule evaluation.
#[derive(Debug, Clone)]
pub struct EvaluatedRecord {
    /// Position in the input batch.
    pub index: usize,
    pub identifier: Identifier,
    pub record: Record,
    pub outcome: ValidationOutcome,
}

/// A record that passed field rule evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidRecord {
    pub index: usize,
    pub sample_name: String,
    pub record: Record,
    pub warnings: Vec<String>,
    /// Findings from relationship validation. Informational only.
    pub relationship_errors: Vec<String>,
}

/// A record that failed field rule evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidRecord {
    pub index: usize,
    pub sample_name: String,
    pub record: Record,
    pub outcome: ValidationOutcome,
}

/// Batch counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Warning messages across all records.
    pub warnings: usize,
    /// Valid records with at least one relationship finding.
    pub relationship_errors: usize,
}

/// One row of the flattened error table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRow {
    #[serde(rename = "Sheet")]
    pub sheet: String,
    #[serde(rename = "Sample Name")]
    pub sample_name: String,
    #[serde(rename = "Column Name")]
    pub column: String,
    #[serde(rename = "Error")]
    pub error: String,
}

/// Complete result of validating one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub sample_kind: SampleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    pub valid: Vec<ValidRecord>,
    pub invalid: Vec<InvalidRecord>,
    pub summary: ReportSummary,
    pub error_table: Vec<ErrorRow>,
    pub generated_at: DateTime<Utc>,
}

/// Build a report from evaluated records and relationship outcomes keyed by
/// batch position. Output order follows the input index.
pub fn aggregate(
    rules: &RuleSet,
    mut evaluated: Vec<EvaluatedRecord>,
    relationships: &BTreeMap<usize, ValidationOutcome>,
) -> ValidationReport {
    evaluated.sort_by_key(|e| e.index);
    let aliases = FieldAliasTable::for_rules(rules);
    let sheet = rules.kind.name().to_string();

    let mut summary = ReportSummary {
        total: evaluated.len(),
        ..ReportSummary::default()
    };
    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    let mut error_table = Vec::new();

    for entry in evaluated {
        let sample_name = entry.identifier.to_string();
        summary.warnings += entry.outcome.warnings.len();

        if entry.outcome.is_valid() {
            let relationship_errors = relationships
                .get(&entry.index)
                .map(ValidationOutcome::error_messages)
                .unwrap_or_default();
            if !relationship_errors.is_empty() {
                summary.relationship_errors += 1;
            }
            summary.valid += 1;
            valid.push(ValidRecord {
                index: entry.index,
                sample_name,
                record: entry.record,
                warnings: entry.outcome.warnings,
                relationship_errors,
            });
        } else {
            for (path, messages) in &entry.outcome.field_errors {
                error_table.push(ErrorRow {
                    sheet: sheet.clone(),
                    sample_name: sample_name.clone(),
                    column: aliases.column_for(path),
                    error: messages.join("; "),
                });
            }
            summary.invalid += 1;
            invalid.push(InvalidRecord {
                index: entry.index,
                sample_name,
                record: entry.record,
                outcome: entry.outcome,
            });
        }
    }

    ValidationReport {
        sample_kind: rules.kind,
        source: None,
        valid,
        invalid,
        summary,
        error_table,
        generated_at: Utc::now(),
    }
}

impl ValidationReport {
    /// Attach input file metadata.
    pub fn with_source(mut self, source: SourceMetadata) -> Self {
        self.source = Some(source);
        self
    }

    /// Whether every record passed field rule evaluation.
    pub fn all_valid(&self) -> bool {
        self.summary.invalid == 0
    }

    /// Plain-text summary.
    pub fn to_text(&self) -> String {
        text::render(self)
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the error table as CSV.
    pub fn write_error_table<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        writer.write_record(["Sheet", "Sample Name", "Column Name", "Error"])?;
        for row in &self.error_table {
            writer.serialize(row)?;
        }
        writer.flush().map_err(|e| ValidatorError::Csv(e.into()))?;
        Ok(())
    }

    /// Write the error table as CSV to a file.
    pub fn save_error_table(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ValidatorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_error_table(BufWriter::new(file))
    }

    /// Write the JSON report to a file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ValidatorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}
