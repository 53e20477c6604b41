//! Input file metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rules::SampleKind;

/// Metadata about the loaded batch file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Kind of the records taken from the file.
    pub sample_kind: SampleKind,
    /// Number of records loaded.
    pub record_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a loaded file.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        sample_kind: SampleKind,
        record_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            sample_kind,
            record_count,
            loaded_at: Utc::now(),
        }
    }
}
