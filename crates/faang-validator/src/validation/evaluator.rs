//! Field rule evaluation for a single record.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::ontology::{incompatibility_message, BreedSpeciesChecker, TermId, TermResolver};
use crate::rules::{BreedSpeciesRule, OntologyRule, Phase, Rule, RuleSet};
use crate::sample::{is_sentinel, FieldValue, Record};

use super::outcome::{ErrorClass, ValidationOutcome};

const FULL_DATE: &str = r"^[12]\d{3}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$";
const YEAR_MONTH: &str = r"^[12]\d{3}-(0[1-9]|1[0-2])$";
const YEAR: &str = r"^[12]\d{3}$";

/// Date patterns keyed by the unit value that selects them.
static DATE_PATTERNS: Lazy<[(&str, Regex); 3]> = Lazy::new(|| {
    [
        ("YYYY-MM-DD", Regex::new(FULL_DATE).unwrap()),
        ("YYYY-MM", Regex::new(YEAR_MONTH).unwrap()),
        ("YYYY", Regex::new(YEAR).unwrap()),
    ]
});

/// Applies a [`RuleSet`] to one record.
///
/// Rules run in phase order. Ontology rules run only when every earlier
/// phase left the record error-free, so a malformed record is not also
/// reported for terms that were never going to resolve.
#[derive(Clone)]
pub struct FieldRuleEvaluator {
    resolver: TermResolver,
    breeds: BreedSpeciesChecker,
    check_ontologies: bool,
}

impl FieldRuleEvaluator {
    /// Create an evaluator resolving terms through `resolver`.
    pub fn new(resolver: TermResolver) -> Self {
        Self {
            breeds: BreedSpeciesChecker::new(resolver.clone()),
            resolver,
            check_ontologies: true,
        }
    }

    /// Enable or disable ontology-bearing rules.
    pub fn with_ontology_checks(mut self, enabled: bool) -> Self {
        self.check_ontologies = enabled;
        self
    }

    /// Evaluate `record` against `rules`.
    pub fn evaluate(&self, record: &Record, rules: &RuleSet) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();

        for rule in rules.ordered_rules() {
            if rule.phase() == Phase::Ontology && (!self.check_ontologies || !outcome.is_valid()) {
                trace!("Skipping ontology checks ({} errors)", outcome.errors.len());
                break;
            }
            self.apply(rule, record, rules, &mut outcome);
        }

        outcome
    }

    fn apply(&self, rule: &Rule, record: &Record, rules: &RuleSet, outcome: &mut ValidationOutcome) {
        let class = rule.phase().error_class();
        match rule {
            Rule::Required(field) => {
                let column = rules.column(field);
                if !record.is_present(column) {
                    outcome.push_error(*field, class, format!("Field '{}' is required", column));
                }
            }

            Rule::Recommended(field) => {
                let column = rules.column(field);
                if !record.is_present(column) {
                    outcome.push_warning(format!(
                        "Field '{}' is recommended but was not provided",
                        column
                    ));
                }
            }

            Rule::RequiredUnless { field, trigger, exempt } => {
                let column = rules.column(field);
                let trigger_column = rules.column(trigger);
                let Some(trigger_value) = record.text(trigger_column) else {
                    return;
                };
                if !exempt.contains(&trigger_value.as_str()) && !record.is_present(column) {
                    outcome.push_error(
                        *field,
                        class,
                        format!(
                            "Field '{}' is required when {} is not '{}'",
                            column,
                            trigger_column,
                            exempt.join("' or '")
                        ),
                    );
                }
            }

            Rule::OneOf { field, allowed } => {
                let column = rules.column(field);
                let Some(value) = record.get(column) else {
                    return;
                };
                for item in value.items() {
                    let item = item.trim();
                    if item.is_empty() || allowed.contains(&item) {
                        continue;
                    }
                    outcome.push_error(
                        *field,
                        class,
                        format!(
                            "{} must be one of [{}], got '{}'",
                            column,
                            quote_list(allowed),
                            item
                        ),
                    );
                }
            }

            Rule::ListShape(field) => {
                let column = rules.column(field);
                if let Some(value) = record.get(column) {
                    if !value.is_blank() && !value.is_list() {
                        outcome.push_error(*field, class, format!("{} must be a list", column));
                    }
                }
            }

            Rule::ObjectList(field) => {
                let column = rules.column(field);
                if let Some(value) = record.get(column) {
                    if !value.is_blank() && !matches!(value, FieldValue::Objects(_)) {
                        outcome.push_error(
                            *field,
                            class,
                            format!("{} must be a list of objects", column),
                        );
                    }
                }
            }

            Rule::MaxItems { field, max, message } => {
                let count = record
                    .get(rules.column(field))
                    .map(|v| v.items().iter().filter(|s| !s.trim().is_empty()).count())
                    .unwrap_or(0);
                if count > *max {
                    outcome.push_error(*field, class, *message);
                }
            }

            Rule::SubFields { field, required } => {
                let Some(value) = record.get(rules.column(field)) else {
                    return;
                };
                for (index, object) in value.objects().iter().enumerate() {
                    for key in required.iter() {
                        let present = object.get(*key).is_some_and(|v| !v.trim().is_empty());
                        if !present {
                            outcome.push_error(
                                format!("{}.{}.{}", field, index, key),
                                class,
                                "Field required",
                            );
                        }
                    }
                }
            }

            Rule::Numeric { field, label, range, unit } => {
                if let Some(message) = check_numeric(record.get(rules.column(field)), label, *range, unit) {
                    outcome.push_error(*field, class, message);
                }
            }

            Rule::DateByUnit { field, unit_field, label } => {
                let Some(value) = checkable_text(record, rules.column(field)) else {
                    return;
                };
                let Some(unit) = record.text(rules.column(unit_field)) else {
                    return;
                };
                let Some((_, pattern)) = DATE_PATTERNS.iter().find(|(u, _)| *u == unit) else {
                    return;
                };
                if !pattern.is_match(&value) {
                    outcome.push_error(
                        *field,
                        class,
                        format!("Invalid {} format: {}. Must match {} pattern", label, value, unit),
                    );
                }
            }

            Rule::Pattern { field, regex, exempt, hint } => {
                let column = rules.column(field);
                let Some(value) = checkable_text(record, column) else {
                    return;
                };
                if exempt.contains(&value.as_str()) {
                    return;
                }
                if !regex.is_match(&value) {
                    outcome.push_error(
                        *field,
                        class,
                        format!("Invalid {} format: {}. {}", column.to_lowercase(), value, hint),
                    );
                }
            }

            Rule::UrlPrefix { field, prefixes, message } => {
                let Some(value) = checkable_text(record, rules.column(field)) else {
                    return;
                };
                if !prefixes.iter().any(|p| value.starts_with(p)) {
                    outcome.push_error(*field, class, *message);
                }
            }

            Rule::Paired { text, term, label } => {
                let term_column = rules.column(term);
                let text_value = record.text(rules.column(text));
                let term_value = record.text(term_column);
                match (text_value, term_value) {
                    (Some(text_value), None) => outcome.push_error(
                        *text,
                        class,
                        format!(
                            "{} '{}' is provided but {} is missing",
                            label, text_value, term_column
                        ),
                    ),
                    (None, Some(term_value)) if !is_sentinel(&term_value) => outcome.push_error(
                        *text,
                        class,
                        format!("{} is provided but {} text is missing", term_column, label),
                    ),
                    _ => {}
                }
            }

            Rule::MatchesCompanion { field, companion, pairs } => {
                if outcome.has_error_at(field) || outcome.has_error_at(companion) {
                    return;
                }
                let (Some(value), Some(companion_value)) = (
                    record.text(rules.column(field)),
                    record.text(rules.column(companion)),
                ) else {
                    return;
                };
                let expected = pairs
                    .iter()
                    .find(|(key, _)| *key == companion_value)
                    .map(|(_, expected)| *expected);
                if let Some(expected) = expected {
                    if value != expected {
                        outcome.push_error(
                            *field,
                            class,
                            format!(
                                "Term '{}' does not match {} '{}'. Expected: '{}'",
                                value,
                                rules.column(companion).to_lowercase(),
                                companion_value,
                                expected
                            ),
                        );
                    }
                }
            }

            Rule::Ontology(ontology) => self.apply_ontology(ontology, record, rules, outcome),

            Rule::BreedSpecies(pair) => self.apply_breed_species(pair, record, rules, outcome),
        }
    }

    fn apply_ontology(
        &self,
        rule: &OntologyRule,
        record: &Record,
        rules: &RuleSet,
        outcome: &mut ValidationOutcome,
    ) {
        let column = rules.column(rule.field);
        let mut targets: Vec<(String, String, Option<String>)> = Vec::new();

        match rule.sub_field {
            Some(sub_field) => {
                let objects = record.get(column).map(FieldValue::objects).unwrap_or(&[]);
                for (index, object) in objects.iter().enumerate() {
                    let Some(term) = object.get(sub_field).map(|t| t.trim()).filter(|t| !t.is_empty()) else {
                        continue;
                    };
                    let label = rule
                        .label_field
                        .and_then(|l| object.get(l))
                        .map(|l| l.trim().to_string());
                    targets.push((
                        format!("{}.{}.{}", rule.field, index, sub_field),
                        term.to_string(),
                        label,
                    ));
                }
            }
            None => {
                if let Some(term) = record.text(column) {
                    let label = rule.label_field.and_then(|l| record.text(rules.column(l)));
                    targets.push((rule.field.to_string(), term, label));
                }
            }
        }

        for (path, term, label) in targets {
            if is_sentinel(&term) {
                continue;
            }

            let parsed = TermId::parse(&term)
                .filter(|id| rule.namespaces.iter().any(|ns| id.in_namespace(ns)));
            let Some(id) = parsed else {
                outcome.push_error(
                    path,
                    ErrorClass::VocabularyResolution,
                    format!(
                        "{} term '{}' should be from {} ontology",
                        rule.subject,
                        term,
                        rule.namespaces.join(" or ")
                    ),
                );
                continue;
            };

            let vocabulary = rule.vocabulary.unwrap_or(id.namespace());
            let resolution = self
                .resolver
                .resolve(&term, vocabulary, rule.allowed_classes, label.as_deref());
            for error in resolution.errors {
                outcome.push_error(
                    path.clone(),
                    ErrorClass::VocabularyResolution,
                    format!("{} term invalid: {}", rule.subject, error),
                );
            }
            for warning in resolution.warnings {
                outcome.push_warning(warning);
            }
        }
    }

    fn apply_breed_species(
        &self,
        pair: &BreedSpeciesRule,
        record: &Record,
        rules: &RuleSet,
        outcome: &mut ValidationOutcome,
    ) {
        if outcome.has_error_at(pair.breed_term) || outcome.has_error_at(pair.species_term) {
            return;
        }
        let (Some(breed_text), Some(species_text), Some(species), Some(breed)) = (
            record.text(rules.column(pair.breed_text)),
            record.text(rules.column(pair.species_text)),
            record.text(rules.column(pair.species_term)),
            record.text(rules.column(pair.breed_term)),
        ) else {
            return;
        };
        if is_sentinel(&species) {
            return;
        }

        let reasons = self.breeds.check(&species, &breed);
        if !reasons.is_empty() {
            trace!("Breed {} rejected for {}: {}", breed, species, reasons.join("; "));
            outcome.push_error(
                pair.breed_term,
                ErrorClass::VocabularyResolution,
                incompatibility_message(&breed_text, &species_text),
            );
        }
    }
}

/// Trimmed scalar text that is neither blank nor a sentinel.
fn checkable_text(record: &Record, column: &str) -> Option<String> {
    record.text(column).filter(|v| !is_sentinel(v))
}

fn check_numeric(
    value: Option<&FieldValue>,
    label: &str,
    range: Option<(f64, f64)>,
    unit: &str,
) -> Option<String> {
    let number = match value? {
        FieldValue::Number(n) => *n,
        FieldValue::Text(text) => {
            let text = text.trim();
            if text.is_empty() || is_sentinel(text) {
                return None;
            }
            match text.parse::<f64>() {
                Ok(n) if n.is_finite() => n,
                _ => return Some(format!("{} must be a valid number, got '{}'", label, text)),
            }
        }
        other if other.is_blank() => return None,
        _ => return Some(format!("{} must be a single number", label)),
    };

    let (min, max) = range?;
    if number < min || number > max {
        let unit = if unit.is_empty() {
            String::new()
        } else {
            format!(" {}", unit)
        };
        return Some(format!(
            "{} must be between {} and {}{}, got {}",
            label, min, max, unit, number
        ));
    }
    None
}

fn quote_list(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::MockTermAuthority;
    use crate::rules::SampleKind;
    use std::sync::Arc;

    fn evaluator() -> (Arc<MockTermAuthority>, FieldRuleEvaluator) {
        let authority = Arc::new(MockTermAuthority::with_livestock_terms());
        let evaluator = FieldRuleEvaluator::new(TermResolver::new(authority.clone()));
        (authority, evaluator)
    }

    fn cow() -> Record {
        Record::new()
            .with_field("Sample Name", "ECA_UKY_H1")
            .with_field("Material", "organism")
            .with_field("Term Source ID", "OBI_0100026")
            .with_field("Project", "FAANG")
            .with_field("Organism", "Bos taurus")
            .with_field("Organism Term Source ID", "NCBITaxon_9913")
            .with_field("Sex", "male")
            .with_field("Sex Term Source ID", "PATO_0000384")
            .with_field("Birth Date", "2019-04")
            .with_field("Unit", "YYYY-MM")
            .with_field("Breed", "Holstein")
            .with_field("Breed Term Source ID", "LBO_0000156")
            .with_field(
                "Health Status",
                FieldValue::Objects(vec![[
                    ("text".to_string(), "normal".to_string()),
                    ("term".to_string(), "PATO:0000461".to_string()),
                ]
                .into_iter()
                .collect()]),
            )
    }

    fn organism_rules() -> &'static RuleSet {
        RuleSet::for_kind(SampleKind::Organism)
    }

    #[test]
    fn test_complete_organism_is_valid() {
        let (_, evaluator) = evaluator();
        let outcome = evaluator.evaluate(&cow(), organism_rules());
        assert!(outcome.is_valid(), "{:?}", outcome.errors);
        assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
    }

    #[test]
    fn test_missing_required_field() {
        let (_, evaluator) = evaluator();
        let record = cow().with_field("Sex", "  ");
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert!(!outcome.is_valid());
        assert_eq!(outcome.messages_for("sex"), &["Field 'Sex' is required".to_string()]);
        assert_eq!(outcome.errors[0].class, ErrorClass::Schema);
    }

    #[test]
    fn test_missing_recommended_field_warns() {
        let (_, evaluator) = evaluator();
        let mut record = Record::new();
        for (column, value) in cow().iter() {
            if column != "Birth Date" {
                record.insert(column.clone(), value.clone());
            }
        }
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert!(outcome.is_valid());
        assert_eq!(
            outcome.warnings,
            vec!["Field 'Birth Date' is recommended but was not provided".to_string()]
        );
    }

    #[test]
    fn test_enumeration_error_names_field_and_value() {
        let (_, evaluator) = evaluator();
        let record = cow().with_field("Delivery Ease", "easy");
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert_eq!(outcome.errors.len(), 1);
        let message = &outcome.errors[0].message;
        assert!(message.starts_with("Delivery Ease must be one of"));
        assert!(message.ends_with("got 'easy'"));
    }

    #[test]
    fn test_invalid_material_term_is_one_error() {
        let (_, evaluator) = evaluator();
        let record = cow().with_field("Term Source ID", "OBI_9999999");
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].field_path, "term_source_id");
    }

    #[test]
    fn test_material_term_mismatch() {
        let (_, evaluator) = evaluator();
        let record = cow().with_field("Term Source ID", "OBI_0001479");
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert_eq!(
            outcome.messages_for("term_source_id"),
            &["Term 'OBI_0001479' does not match material 'organism'. Expected: 'OBI_0100026'".to_string()]
        );
        assert_eq!(outcome.errors[0].class, ErrorClass::Consistency);
    }

    #[test]
    fn test_latitude_range_and_parse() {
        let (_, evaluator) = evaluator();
        let out_of_range = cow().with_field("Birth Location Latitude", "95.5");
        let outcome = evaluator.evaluate(&out_of_range, organism_rules());
        assert_eq!(
            outcome.messages_for("birth_location_latitude"),
            &["Latitude must be between -90 and 90 degrees, got 95.5".to_string()]
        );

        let garbage = cow().with_field("Birth Location Longitude", "east");
        let outcome = evaluator.evaluate(&garbage, organism_rules());
        assert_eq!(
            outcome.messages_for("birth_location_longitude"),
            &["Longitude must be a valid number, got 'east'".to_string()]
        );

        let numeric = cow().with_field("Birth Location Latitude", -45.25);
        assert!(evaluator.evaluate(&numeric, organism_rules()).is_valid());
    }

    #[test]
    fn test_empty_numeric_is_absent() {
        let (_, evaluator) = evaluator();
        let record = cow().with_field("Birth Weight", "");
        assert!(evaluator.evaluate(&record, organism_rules()).is_valid());
    }

    #[test]
    fn test_birth_date_pattern_follows_unit() {
        let (_, evaluator) = evaluator();
        let record = cow().with_field("Birth Date", "2019-04-31x").with_field("Unit", "YYYY-MM-DD");
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert_eq!(
            outcome.messages_for("birth_date"),
            &["Invalid birth date format: 2019-04-31x. Must match YYYY-MM-DD pattern".to_string()]
        );

        let year_only = cow().with_field("Birth Date", "2019").with_field("Unit", "YYYY");
        assert!(evaluator.evaluate(&year_only, organism_rules()).is_valid());

        let sentinel = cow().with_field("Birth Date", "not collected").with_field("Unit", "YYYY");
        assert!(evaluator.evaluate(&sentinel, organism_rules()).is_valid());
    }

    #[test]
    fn test_breed_without_term_skips_ontology() {
        let (authority, evaluator) = evaluator();
        let record = cow().with_field("Breed Term Source ID", "");
        let outcome = evaluator.evaluate(&record, organism_rules());

        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].class, ErrorClass::Consistency);
        assert_eq!(
            outcome.errors[0].message,
            "Breed 'Holstein' is provided but Breed Term Source ID is missing"
        );
        assert_eq!(authority.lookup_count(), 0);
    }

    #[test]
    fn test_breed_term_without_text() {
        let (_, evaluator) = evaluator();
        let record = cow().with_field("Breed", "");
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert_eq!(
            outcome.messages_for("breed"),
            &["Breed Term Source ID is provided but Breed text is missing".to_string()]
        );

        let sentinel = cow().with_field("Breed", "").with_field("Breed Term Source ID", "not applicable");
        assert!(evaluator.evaluate(&sentinel, organism_rules()).is_valid());
    }

    #[test]
    fn test_ontology_namespace_and_class() {
        let (_, evaluator) = evaluator();
        let wrong_namespace = cow().with_field("Sex Term Source ID", "EFO_0000408");
        let outcome = evaluator.evaluate(&wrong_namespace, organism_rules());
        assert_eq!(
            outcome.messages_for("sex_term_source_id"),
            &["Sex term 'EFO_0000408' should be from PATO ontology".to_string()]
        );

        let wrong_class = cow().with_field("Sex Term Source ID", "PATO_0000461");
        let outcome = evaluator.evaluate(&wrong_class, organism_rules());
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].message.starts_with("Sex term invalid:"));
        assert_eq!(outcome.errors[0].class, ErrorClass::VocabularyResolution);
    }

    #[test]
    fn test_label_mismatch_is_warning_only() {
        let (_, evaluator) = evaluator();
        let record = cow()
            .with_field("Breed", "Friesian")
            .with_field("Breed Term Source ID", "LBO_0000156");
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert!(outcome.is_valid(), "{:?}", outcome.errors);
        let mismatches: Vec<&String> = outcome
            .warnings
            .iter()
            .filter(|w| w.contains("doesn't precisely match"))
            .collect();
        assert_eq!(mismatches.len(), 1);
        assert!(mismatches[0].contains("'Friesian'"));
    }

    #[test]
    fn test_organism_and_sex_text_are_not_compared() {
        let (_, evaluator) = evaluator();
        let record = cow().with_field("Sex", "bull").with_field("Organism", "cattle");
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert!(outcome.is_valid(), "{:?}", outcome.errors);
        assert!(
            !outcome.warnings.iter().any(|w| w.contains("doesn't precisely match")),
            "{:?}",
            outcome.warnings
        );
    }

    #[test]
    fn test_incompatible_breed() {
        let (_, evaluator) = evaluator();
        let record = cow()
            .with_field("Breed", "Large White")
            .with_field("Breed Term Source ID", "LBO_0000358");
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert_eq!(
            outcome.messages_for("breed_term_source_id"),
            &["Breed 'Large White' is not compatible with species 'Bos taurus'".to_string()]
        );
    }

    #[test]
    fn test_health_status_paths() {
        let (_, evaluator) = evaluator();
        let record = cow().with_field(
            "Health Status",
            FieldValue::Objects(vec![
                [("text".to_string(), "normal".to_string()), ("term".to_string(), "PATO:0000461".to_string())]
                    .into_iter()
                    .collect(),
                [("text".to_string(), "sick".to_string())].into_iter().collect(),
            ]),
        );
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert_eq!(outcome.messages_for("health_status.1.term"), &["Field required".to_string()]);
    }

    #[test]
    fn test_health_status_of_plain_strings_is_rejected() {
        let (authority, evaluator) = evaluator();
        let record = cow().with_field("Health Status", vec!["definitely-not-a-term"]);
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert_eq!(
            outcome.messages_for("health_status"),
            &["Health Status must be a list of objects".to_string()]
        );
        assert_eq!(outcome.errors[0].class, ErrorClass::Schema);
        assert_eq!(authority.lookup_count(), 0);

        let scalar = cow().with_field("Health Status", "normal");
        assert!(evaluator.evaluate(&scalar, organism_rules()).has_error_at("health_status"));
    }

    #[test]
    fn test_health_status_term_out_of_class() {
        let (_, evaluator) = evaluator();
        let record = cow().with_field(
            "Health Status",
            FieldValue::Objects(vec![[
                ("text".to_string(), "male".to_string()),
                ("term".to_string(), "PATO:0000384".to_string()),
            ]
            .into_iter()
            .collect()]),
        );
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert!(outcome.has_error_at("health_status.0.term"));
    }

    #[test]
    fn test_schema_errors_suppress_ontology_lookups() {
        let (authority, evaluator) = evaluator();
        let record = cow().with_field("Project", "NOT-FAANG");
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(authority.lookup_count(), 0);
    }

    #[test]
    fn test_ontology_checks_can_be_disabled() {
        let (authority, evaluator) = evaluator();
        let evaluator = evaluator.with_ontology_checks(false);
        let record = cow().with_field("Sex Term Source ID", "PATO_0000461");
        assert!(evaluator.evaluate(&record, organism_rules()).is_valid());
        assert_eq!(authority.lookup_count(), 0);
    }

    #[test]
    fn test_child_of_limit() {
        let (_, evaluator) = evaluator();
        let record = cow().with_field("Child Of", vec!["A", "B", "C"]);
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert_eq!(outcome.messages_for("child_of"), &["Organism can have at most 2 parents".to_string()]);

        let with_blanks = cow().with_field("Child Of", vec!["A", "", "B"]);
        assert!(evaluator.evaluate(&with_blanks, organism_rules()).is_valid());
    }

    #[test]
    fn test_url_prefixes() {
        let (_, evaluator) = evaluator();
        let record = cow()
            .with_field("Pedigree", "ftp://example.org/tree")
            .with_field("Availability", "mailto:dcc@faang.org");
        let outcome = evaluator.evaluate(&record, organism_rules());
        assert_eq!(
            outcome.messages_for("pedigree"),
            &["Pedigree must be a valid URL starting with http:// or https://".to_string()]
        );
        assert!(!outcome.has_error_at("availability"));
    }

    fn organoid() -> Record {
        Record::new()
            .with_field("Sample Name", "ORG_1")
            .with_field("Material", "organoid")
            .with_field("Material Term Source ID", "NCIT_C172259")
            .with_field("Project", "FAANG")
            .with_field("Organ Model", "liver")
            .with_field("Organ Model Term Source ID", "UBERON_0002107")
            .with_field("Freezing Method", "fresh")
            .with_field("Organoid Passage", "3")
            .with_field("Organoid Passage Unit", "passages")
            .with_field("Organoid Passage Protocol", "https://example.org/protocol.pdf")
            .with_field("Type Of Organoid Culture", "3D")
            .with_field("Growth Environment", "matrigel")
            .with_field("Derived From", "SAMEA1")
    }

    #[test]
    fn test_fresh_organoid_needs_no_freezing_fields() {
        let (_, evaluator) = evaluator();
        let outcome = evaluator.evaluate(&organoid(), RuleSet::for_kind(SampleKind::Organoid));
        assert!(outcome.is_valid(), "{:?}", outcome.errors);
    }

    #[test]
    fn test_frozen_organoid_needs_freezing_fields() {
        let (_, evaluator) = evaluator();
        let record = organoid().with_field("Freezing Method", "frozen, liquid nitrogen");
        let outcome = evaluator.evaluate(&record, RuleSet::for_kind(SampleKind::Organoid));
        assert_eq!(outcome.errors.len(), 3);
        assert_eq!(outcome.count_class(ErrorClass::ConditionalRequirement), 3);
        assert_eq!(
            outcome.messages_for("freezing_date"),
            &["Field 'Freezing Date' is required when Freezing Method is not 'fresh'".to_string()]
        );
    }

    #[test]
    fn test_organoid_secondary_project_must_be_list() {
        let (_, evaluator) = evaluator();
        let record = organoid().with_field("Secondary Project", "BovReg");
        let outcome = evaluator.evaluate(&record, RuleSet::for_kind(SampleKind::Organoid));
        assert_eq!(
            outcome.messages_for("secondary_project"),
            &["Secondary Project must be a list".to_string()]
        );

        let listed = organoid().with_field("Secondary Project", vec!["BovReg", "GENE-SWitCH"]);
        assert!(evaluator.evaluate(&listed, RuleSet::for_kind(SampleKind::Organoid)).is_valid());
    }

    #[test]
    fn test_teleost_photoperiod() {
        let (_, evaluator) = evaluator();
        let mut record = Record::new()
            .with_field("Sample Name", "EMB_1")
            .with_field("Material", "specimen from organism")
            .with_field("Material Term Source ID", "OBI_0001479")
            .with_field("Project", "FAANG");
        for (column, value) in [
            ("Origin", "Wild"),
            ("Reproductive Strategy", "gonochoric"),
            ("Hatching", "pre"),
            ("Time Post Fertilisation", "48"),
            ("Time Post Fertilisation Unit", "hours"),
            ("Pre-hatching Water Temperature Average", "8.5"),
            ("Pre-hatching Water Temperature Average Unit", "Degrees celsius"),
            ("Post-hatching Water Temperature Average", "restricted access"),
            ("Post-hatching Water Temperature Average Unit", "restricted access"),
            ("Degree Days", "408"),
            ("Degree Days Unit", "Thermal time"),
            ("Growth Media", "Water"),
            ("Medium Replacement Frequency", "2"),
            ("Medium Replacement Frequency Unit", "days"),
            ("Percentage Total Somite Number", "45"),
            ("Percentage Total Somite Number Unit", "%"),
            ("Average Water Salinity", "0"),
            ("Average Water Salinity Unit", "parts per thousand"),
            ("Photoperiod", "14L:10D"),
        ] {
            record.insert(column, value);
        }
        let rules = RuleSet::for_kind(SampleKind::TeleostEmbryo);
        assert!(evaluator.evaluate(&record, rules).is_valid());

        record.insert("Photoperiod", "long days");
        let outcome = evaluator.evaluate(&record, rules);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0]
            .message
            .starts_with("Invalid photoperiod format: long days."));

        record.insert("Photoperiod", "natural light");
        assert!(evaluator.evaluate(&record, rules).is_valid());
    }
}
