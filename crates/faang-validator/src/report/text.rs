//! Plain-text report rendering.

use crate::rules::SampleKind;

use super::ValidationReport;

fn plural(kind: SampleKind) -> String {
    format!("{}s", kind.label().to_lowercase())
}

pub(super) fn render(report: &ValidationReport) -> String {
    let kind = report.sample_kind;
    let noun = plural(kind);
    let mut lines = vec![
        format!("FAANG {} Validation Report", kind.label()),
        "=".repeat(40),
        format!("\nTotal {} processed: {}", noun, report.summary.total),
        format!("Valid {}: {}", noun, report.summary.valid),
        format!("Invalid {}: {}", noun, report.summary.invalid),
    ];

    if report.summary.invalid == 0 {
        lines.push("\nAll records are valid.".to_string());
        return lines.join("\n");
    }

    lines.push("\nErrors:".to_string());
    lines.push("-".repeat(20));
    for entry in &report.invalid {
        lines.push(format!(
            "\n{}: {} (index: {})",
            kind.label(),
            entry.sample_name,
            entry.index
        ));
        for error in &entry.outcome.errors {
            lines.push(format!("  ERROR in {}: {}", error.field_path, error.message));
        }
    }

    let relationship: Vec<_> = report
        .valid
        .iter()
        .filter(|v| !v.relationship_errors.is_empty())
        .collect();
    if !relationship.is_empty() {
        lines.push("\nRelationship findings:".to_string());
        lines.push("-".repeat(20));
        for entry in relationship {
            for error in &entry.relationship_errors {
                lines.push(format!("  {}: {}", entry.sample_name, error));
            }
        }
    }

    let warned: Vec<(&str, &[String])> = report
        .valid
        .iter()
        .map(|v| (v.sample_name.as_str(), v.warnings.as_slice()))
        .chain(
            report
                .invalid
                .iter()
                .map(|i| (i.sample_name.as_str(), i.outcome.warnings.as_slice())),
        )
        .filter(|(_, warnings)| !warnings.is_empty())
        .collect();
    if !warned.is_empty() {
        lines.push("\nWarnings:".to_string());
        lines.push("-".repeat(20));
        for (name, warnings) in warned {
            for warning in warnings {
                lines.push(format!("  {}: {}", name, warning));
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::report::{aggregate, EvaluatedRecord};
    use crate::rules::{RuleSet, SampleKind};
    use crate::sample::Record;
    use crate::validation::{ErrorClass, ValidationOutcome};

    fn entry(index: usize, name: &str, outcome: ValidationOutcome) -> EvaluatedRecord {
        let record = Record::new().with_field("Sample Name", name);
        EvaluatedRecord {
            index,
            identifier: record.identifier(index),
            record,
            outcome,
        }
    }

    #[test]
    fn test_all_valid_report() {
        let report = aggregate(
            RuleSet::for_kind(SampleKind::Organism),
            vec![entry(0, "A", ValidationOutcome::new())],
            &BTreeMap::new(),
        );
        assert_eq!(
            report.to_text(),
            "FAANG Organism Validation Report\n\
             ========================================\n\
             \n\
             Total organisms processed: 1\n\
             Valid organisms: 1\n\
             Invalid organisms: 0\n\
             \n\
             All records are valid."
        );
    }

    #[test]
    fn test_report_lists_errors_and_warnings() {
        let mut bad = ValidationOutcome::new();
        bad.push_error("sex", ErrorClass::Schema, "Field 'Sex' is required");
        let mut warned = ValidationOutcome::new();
        warned.push_warning("Field 'Breed' is recommended but was not provided");

        let report = aggregate(
            RuleSet::for_kind(SampleKind::TeleostEmbryo),
            vec![entry(0, "E1", bad), entry(1, "E2", warned)],
            &BTreeMap::new(),
        );
        let text = report.to_text();
        assert!(text.starts_with("FAANG Teleost Embryo Validation Report"));
        assert!(text.contains("Invalid teleost embryos: 1"));
        assert!(text.contains("Teleost Embryo: E1 (index: 0)"));
        assert!(text.contains("  ERROR in sex: Field 'Sex' is required"));
        assert!(text.contains("  E2: Field 'Breed' is recommended but was not provided"));
        assert!(!text.contains("All records are valid."));
    }
}
