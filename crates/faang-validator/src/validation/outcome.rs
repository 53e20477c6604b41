//! Per-record validation findings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Category of a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// Missing required field, bad enumeration value, wrong shape or format.
    Schema,
    /// Field required only because of another field's value.
    ConditionalRequirement,
    /// Two fields of the same record disagree.
    Consistency,
    /// Controlled-vocabulary term could not be resolved or is not allowed.
    VocabularyResolution,
    /// Problem with a parent reference between records.
    Relationship,
}

impl ErrorClass {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorClass::Schema => "Schema",
            ErrorClass::ConditionalRequirement => "Conditional Requirement",
            ErrorClass::Consistency => "Consistency",
            ErrorClass::VocabularyResolution => "Vocabulary Resolution",
            ErrorClass::Relationship => "Relationship",
        }
    }
}

/// A single error tied to a field path.
///
/// Paths are internal field names, optionally extended with list indices and
/// sub-field names (`health_status.0.term`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Internal field path.
    pub field_path: String,
    /// Human-readable message.
    pub message: String,
    /// Error category.
    pub class: ErrorClass,
}

/// Errors and warnings collected for one record.
///
/// A record is valid iff `errors` is empty; warnings never affect validity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Errors in the order they were found.
    pub errors: Vec<FieldError>,
    /// Advisory messages.
    pub warnings: Vec<String>,
    /// Error messages grouped by field path.
    pub field_errors: IndexMap<String, Vec<String>>,
}

impl ValidationOutcome {
    /// Create an empty outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error against a field path.
    pub fn push_error(
        &mut self,
        field_path: impl Into<String>,
        class: ErrorClass,
        message: impl Into<String>,
    ) {
        let field_path = field_path.into();
        let message = message.into();
        self.field_errors
            .entry(field_path.clone())
            .or_default()
            .push(message.clone());
        self.errors.push(FieldError {
            field_path,
            message,
            class,
        });
    }

    /// Record a warning.
    pub fn push_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Whether the record passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any warning was raised.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether a field path already carries an error.
    pub fn has_error_at(&self, field_path: &str) -> bool {
        self.field_errors.contains_key(field_path)
    }

    /// Error messages for a field path.
    pub fn messages_for(&self, field_path: &str) -> &[String] {
        self.field_errors
            .get(field_path)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All error messages in order.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Number of errors of the given class.
    pub fn count_class(&self, class: ErrorClass) -> usize {
        self.errors.iter().filter(|e| e.class == class).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_error_groups_by_path() {
        let mut outcome = ValidationOutcome::new();
        outcome.push_error("sex", ErrorClass::Schema, "Field 'Sex' is required");
        outcome.push_error("health_status.0.term", ErrorClass::Schema, "Field required");
        outcome.push_error("sex", ErrorClass::VocabularyResolution, "second");

        assert!(!outcome.is_valid());
        assert_eq!(outcome.errors.len(), 3);
        assert_eq!(outcome.field_errors.len(), 2);
        assert_eq!(outcome.messages_for("sex").len(), 2);
        assert!(outcome.has_error_at("health_status.0.term"));
        assert!(outcome.messages_for("breed").is_empty());
        assert_eq!(outcome.count_class(ErrorClass::Schema), 2);
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let mut outcome = ValidationOutcome::new();
        outcome.push_warning("Field 'Breed' is recommended but was not provided");
        assert!(outcome.is_valid());
        assert!(outcome.has_warnings());
    }

    #[test]
    fn test_serialization() {
        let mut outcome = ValidationOutcome::new();
        outcome.push_error("project", ErrorClass::ConditionalRequirement, "msg");
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"conditional_requirement\""));
        assert!(json.contains("\"field_errors\":{\"project\":[\"msg\"]}"));
    }
}
