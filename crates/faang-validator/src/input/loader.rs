//! JSON batch loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{Result, ValidatorError};
use crate::rules::SampleKind;
use crate::sample::Record;

use super::source::SourceMetadata;

/// Records of one kind, in input order.
#[derive(Debug, Clone)]
pub struct Batch {
    pub kind: SampleKind,
    pub records: Vec<Record>,
}

/// Loads JSON batches.
///
/// Two layouts are accepted: a bare array of records, which needs the kind
/// given up front, or an object keyed by kind name
/// (`{"organism": [...]}`).
#[derive(Debug, Clone, Default)]
pub struct BatchLoader {
    kind: Option<SampleKind>,
}

impl BatchLoader {
    /// Create a loader that infers the kind from keyed batches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the kind to load.
    pub fn with_kind(mut self, kind: SampleKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Load a file and describe it.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(Batch, SourceMetadata)> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| ValidatorError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_error)?;
        let size_bytes = file.metadata().map_err(io_error)?.len();
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_error)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let batch = self.parse_bytes(&contents)?;
        debug!(
            "Loaded {} {} records from {}",
            batch.records.len(),
            batch.kind,
            path.display()
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            batch.kind,
            batch.records.len(),
        );
        Ok((batch, source))
    }

    /// Parse a JSON document.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Batch> {
        let document: Value = serde_json::from_slice(bytes)?;

        let (kind, records) = match document {
            Value::Array(_) => {
                let kind = self.kind.ok_or_else(|| {
                    ValidatorError::Config(
                        "a bare record array needs an explicit sample kind".to_string(),
                    )
                })?;
                (kind, records_from(document)?)
            }
            Value::Object(sections) => {
                let mut found: Vec<(SampleKind, Value)> = Vec::new();
                for (key, value) in sections {
                    match key.parse::<SampleKind>() {
                        Ok(kind) => found.push((kind, value)),
                        Err(_) => warn!("Ignoring unsupported section '{}'", key),
                    }
                }

                let (kind, value) = match self.kind {
                    Some(kind) => found.into_iter().find(|(k, _)| *k == kind).ok_or_else(|| {
                        ValidatorError::EmptyData(format!("no '{}' section in input", kind))
                    })?,
                    None if found.len() == 1 => found.remove(0),
                    None if found.is_empty() => {
                        return Err(ValidatorError::EmptyData(
                            "no sample kind section in input".to_string(),
                        ))
                    }
                    None => {
                        let names: Vec<&str> = found.iter().map(|(k, _)| k.name()).collect();
                        return Err(ValidatorError::Config(format!(
                            "input holds several sample kinds ({}); choose one",
                            names.join(", ")
                        )));
                    }
                };
                (kind, records_from(value)?)
            }
            _ => {
                return Err(ValidatorError::Config(
                    "input must be a JSON array or an object keyed by sample kind".to_string(),
                ))
            }
        };

        if records.is_empty() {
            return Err(ValidatorError::EmptyData(format!("no {} records found", kind)));
        }
        Ok(Batch { kind, records })
    }
}

/// Decode a section record by record.
///
/// An entry that is not a JSON object becomes an empty record at its
/// position, so it is reported invalid without stopping the rest.
fn records_from(section: Value) -> Result<Vec<Record>> {
    let Value::Array(entries) = section else {
        return Err(ValidatorError::Config(
            "a sample kind section must be an array of records".to_string(),
        ));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| -> Result<Record> {
            if entry.is_object() {
                Ok(serde_json::from_value::<Record>(entry)?)
            } else {
                warn!("Record {} is not a JSON object; treating it as empty", index);
                Ok(Record::new())
            }
        })
        .collect()
}
