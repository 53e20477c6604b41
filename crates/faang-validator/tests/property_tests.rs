//! Property-based tests for the field rule evaluator and term handling.
//!
//! These tests use proptest to generate random inputs and check that
//! evaluation never panics, is deterministic, and reports exactly what each
//! rule promises.
//!
//! ```bash
//! # Run with more cases
//! PROPTEST_CASES=10000 cargo test -p faang-validator --test property_tests
//! ```

use std::sync::Arc;

use proptest::prelude::*;

use faang_validator::ontology::{normalize_term, TermId};
use faang_validator::{
    ErrorClass, FieldRuleEvaluator, FieldValue, MockTermAuthority, Record, RuleSet, SampleKind,
    TermResolver,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Arbitrary printable text, including separators used by term ids.
fn field_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:\\-\\.\\s/]{0,40}"
}

/// Random UTF-8 input.
fn any_text() -> impl Strategy<Value = String> {
    any::<String>()
}

/// Lowercase words that are never a valid delivery ease.
fn bogus_enumeration() -> impl Strategy<Value = String> {
    "[a-z]{1,12}"
}

fn organism_column() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("Sample Name"),
        Just("Material"),
        Just("Term Source ID"),
        Just("Organism"),
        Just("Organism Term Source ID"),
        Just("Sex Term Source ID"),
        Just("Birth Date"),
        Just("Unit"),
        Just("Breed Term Source ID"),
        Just("Birth Location Latitude"),
        Just("Pedigree"),
        Just("Child Of"),
    ]
}

fn evaluator() -> FieldRuleEvaluator {
    FieldRuleEvaluator::new(TermResolver::new(Arc::new(
        MockTermAuthority::with_livestock_terms(),
    )))
}

fn cow() -> Record {
    Record::new()
        .with_field("Sample Name", "COW_1")
        .with_field("Material", "organism")
        .with_field("Term Source ID", "OBI_0100026")
        .with_field("Project", "FAANG")
        .with_field("Organism", "Bos taurus")
        .with_field("Organism Term Source ID", "NCBITaxon_9913")
        .with_field("Sex", "male")
        .with_field("Sex Term Source ID", "PATO_0000384")
}

fn organism_rules() -> &'static RuleSet {
    RuleSet::for_kind(SampleKind::Organism)
}

// =============================================================================
// Evaluator Properties
// =============================================================================

mod evaluator_tests {
    use super::*;

    proptest! {
        /// Evaluation never panics whatever text lands in a column.
        #[test]
        fn never_panics_on_field_text(column in organism_column(), value in field_text()) {
            let record = cow().with_field(column, value);
            let _ = evaluator().evaluate(&record, organism_rules());
        }

        /// Evaluation never panics on random UTF-8.
        #[test]
        fn never_panics_on_random_utf8(column in organism_column(), value in any_text()) {
            let record = cow().with_field(column, value);
            let _ = evaluator().evaluate(&record, organism_rules());
        }

        /// Evaluating the same record twice gives the same outcome.
        #[test]
        fn evaluation_is_deterministic(column in organism_column(), value in field_text()) {
            let evaluator = evaluator();
            let record = cow().with_field(column, value);
            let first = evaluator.evaluate(&record, organism_rules());
            let second = evaluator.evaluate(&record, organism_rules());
            prop_assert_eq!(first, second);
        }

        /// A value outside an enumeration yields exactly one error.
        #[test]
        fn enumeration_violation_is_one_error(value in bogus_enumeration()) {
            let record = cow().with_field("Delivery Ease", value.as_str());
            let outcome = evaluator().evaluate(&record, organism_rules());
            prop_assert_eq!(outcome.errors.len(), 1);
            prop_assert_eq!(outcome.errors[0].class, ErrorClass::Schema);
            let expected_suffix = format!("got '{}'", value);
            prop_assert!(outcome.errors[0].message.ends_with(&expected_suffix));
        }

        /// Latitudes inside the range pass; outside it exactly one error names the range.
        #[test]
        fn latitude_range(latitude in -200.0f64..200.0) {
            let record = cow().with_field("Birth Location Latitude", latitude.to_string());
            let outcome = evaluator().evaluate(&record, organism_rules());
            let messages = outcome.messages_for("birth_location_latitude");
            if (-90.0..=90.0).contains(&latitude) {
                prop_assert!(messages.is_empty());
            } else {
                prop_assert_eq!(messages.len(), 1);
                prop_assert!(messages[0].starts_with("Latitude must be between -90 and 90 degrees"));
            }
        }

        /// Numeric columns accept numbers given as JSON numbers.
        #[test]
        fn numeric_values_accept_numbers(weight in 0.0f64..5000.0) {
            let record = cow()
                .with_field("Birth Weight", FieldValue::Number(weight))
                .with_field("Birth Weight Unit", "kilograms");
            let outcome = evaluator().evaluate(&record, organism_rules());
            prop_assert!(!outcome.has_error_at("birth_weight"));
        }
    }
}

// =============================================================================
// Term Id Properties
// =============================================================================

mod term_tests {
    use super::*;

    proptest! {
        /// Parsing never panics.
        #[test]
        fn parse_never_panics(input in any_text()) {
            let _ = TermId::parse(&input);
        }

        /// Both spellings of an id parse to the same term.
        #[test]
        fn separators_are_equivalent(namespace in "[A-Za-z]{1,10}", code in "[0-9]{1,8}") {
            let colon = TermId::parse(&format!("{}:{}", namespace, code));
            let underscore = TermId::parse(&format!("{}_{}", namespace, code));
            prop_assert!(colon.is_some());
            prop_assert_eq!(colon, underscore);
        }

        /// Canonical form reparses to the same term.
        #[test]
        fn canonical_form_is_stable(input in field_text()) {
            if let Some(term) = TermId::parse(&input) {
                let canonical = term.canonical();
                prop_assert_eq!(TermId::parse(&canonical), Some(term));
            }
        }

        /// Normalizing twice changes nothing.
        #[test]
        fn normalize_is_idempotent(input in field_text()) {
            let once = normalize_term(&input);
            prop_assert_eq!(normalize_term(&once), once.clone());
        }
    }
}

// =============================================================================
// Record Properties
// =============================================================================

mod record_tests {
    use super::*;

    proptest! {
        /// A non-blank sample name is the identifier, trimmed.
        #[test]
        fn named_identifier_is_trimmed(name in "[A-Za-z0-9_]{1,20}", pad in "[ \t]{0,3}") {
            let record = Record::new().with_field("Sample Name", format!("{}{}{}", pad, name, pad));
            let identifier = record.identifier(7);
            prop_assert_eq!(identifier.name(), Some(name.as_str()));
        }

        /// Blank names fall back to the positional placeholder.
        #[test]
        fn blank_name_uses_placeholder(pad in "[ \t]{0,5}", index in 0usize..10_000) {
            let record = Record::new().with_field("Sample Name", pad);
            prop_assert_eq!(record.identifier(index).to_string(), format!("record_{}", index));
        }
    }
}
