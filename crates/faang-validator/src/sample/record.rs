//! Sample records and their graph identifiers.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::{FieldValue, RESTRICTED_ACCESS};

/// Display name of the column that identifies a sample.
pub const SAMPLE_NAME_COLUMN: &str = "Sample Name";

/// One sample: an ordered mapping from column display name to value.
///
/// JSON `null` values are dropped on load, so an absent column and a null
/// column read the same.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, Option<FieldValue>>",
    into = "IndexMap<String, FieldValue>"
)]
pub struct Record {
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field (builder style).
    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Get a field by column name.
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// Whether the column holds a non-blank value.
    pub fn is_present(&self, column: &str) -> bool {
        self.get(column).is_some_and(|v| !v.is_blank())
    }

    /// Trimmed scalar text of a column, `None` when absent, blank or a list.
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column)
            .and_then(FieldValue::to_scalar_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate columns in their original order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// Graph identifier for the record at `index` in its batch.
    pub fn identifier(&self, index: usize) -> Identifier {
        match self.text(SAMPLE_NAME_COLUMN) {
            Some(name) => Identifier::Named(name),
            None => Identifier::Placeholder(index),
        }
    }

    /// Parent references held in `column`.
    ///
    /// Scalars count as a one-entry list. Entries are trimmed; blanks and
    /// "restricted access" are dropped.
    pub fn references(&self, column: &str) -> Vec<String> {
        self.get(column)
            .map(FieldValue::items)
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && s != RESTRICTED_ACCESS)
            .collect()
    }
}

impl From<IndexMap<String, Option<FieldValue>>> for Record {
    fn from(raw: IndexMap<String, Option<FieldValue>>) -> Self {
        let fields = raw
            .into_iter()
            .filter_map(|(column, value)| value.map(|v| (column, v)))
            .collect();
        Self { fields }
    }
}

impl From<Record> for IndexMap<String, FieldValue> {
    fn from(record: Record) -> Self {
        record.fields
    }
}

/// Graph node key of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Identifier {
    /// Trimmed, non-blank sample name.
    Named(String),
    /// Stand-in for a record without a usable name; never a valid parent.
    Placeholder(usize),
}

impl Identifier {
    /// The sample name, if the record has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Identifier::Named(name) => Some(name),
            Identifier::Placeholder(_) => None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Named(name) => f.write_str(name),
            Identifier::Placeholder(index) => write!(f, "record_{}", index),
        }
    }
}
