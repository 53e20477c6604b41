//! Internal field path to spreadsheet column mapping.

use indexmap::IndexMap;

use crate::rules::RuleSet;

/// Bidirectional map between internal field paths and column display names.
#[derive(Debug, Clone, Default)]
pub struct FieldAliasTable {
    to_column: IndexMap<String, String>,
    to_field: IndexMap<String, String>,
}

impl FieldAliasTable {
    /// Build the table for a rule set, nested aliases included.
    pub fn for_rules(rules: &RuleSet) -> Self {
        let mut table = Self::default();
        for def in rules.fields.iter().chain(rules.nested.iter()) {
            table.insert(def.name, def.column);
        }
        table
    }

    /// Add a mapping. The first field claiming a column keeps the reverse entry.
    pub fn insert(&mut self, field: impl Into<String>, column: impl Into<String>) {
        let field = field.into();
        let column = column.into();
        self.to_field.entry(column.clone()).or_insert_with(|| field.clone());
        self.to_column.insert(field, column);
    }

    /// Column display name for a field path.
    ///
    /// Falls back from `list.0.sub` to `list.sub`, then to `list`, and
    /// finally to the raw path.
    pub fn column_for(&self, path: &str) -> String {
        if let Some(column) = self.to_column.get(path) {
            return column.clone();
        }

        let parts: Vec<&str> = path.split('.').collect();
        if parts.len() > 2 && parts[1].chars().all(|c| c.is_ascii_digit()) {
            let without_index = format!("{}.{}", parts[0], parts[2]);
            if let Some(column) = self.to_column.get(&without_index) {
                return column.clone();
            }
        }
        if parts.len() > 1 {
            if let Some(column) = self.to_column.get(parts[0]) {
                return column.clone();
            }
        }

        path.to_string()
    }

    /// Internal field name for a column.
    pub fn field_for(&self, column: &str) -> Option<&str> {
        self.to_field.get(column).map(String::as_str)
    }

    /// Field and column pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.to_column.iter().map(|(f, c)| (f.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.to_column.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_column.is_empty()
    }
}
