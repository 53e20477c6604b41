//! Organism rule table.

use once_cell::sync::Lazy;

use super::{standard, BreedSpeciesRule, FieldDef, OntologyRule, RelationshipSpec, Rule, RuleSet, SampleKind};

const BIRTH_DATE_UNITS: &[&str] = &[
    "YYYY-MM-DD",
    "YYYY-MM",
    "YYYY",
    "not applicable",
    "not collected",
    "not provided",
    "restricted access",
];
const DEGREES: &[&str] = &["decimal degrees"];
const WEIGHT_UNITS: &[&str] = &["kilograms", "grams"];
const PREGNANCY_LENGTH_UNITS: &[&str] = &["days", "weeks", "months", "day", "week", "month"];
const DELIVERY_TIMINGS: &[&str] = &[
    "early parturition",
    "full-term parturition",
    "delayed parturition",
];
const DELIVERY_EASE: &[&str] = &[
    "normal autonomous delivery",
    "c-section",
    "veterinarian assisted",
];
const URL_PREFIXES: &[&str] = &["http://", "https://"];

pub(crate) static RULES: Lazy<RuleSet> = Lazy::new(|| {
    let mut fields = standard::fields("Term Source ID");
    fields.extend([
        FieldDef::new("organism", "Organism"),
        FieldDef::new("organism_term_source_id", "Organism Term Source ID"),
        FieldDef::new("sex", "Sex"),
        FieldDef::new("sex_term_source_id", "Sex Term Source ID"),
        FieldDef::new("birth_date", "Birth Date"),
        FieldDef::new("birth_date_unit", "Unit"),
        FieldDef::new("breed", "Breed"),
        FieldDef::new("breed_term_source_id", "Breed Term Source ID"),
        FieldDef::new("health_status", "Health Status"),
        FieldDef::new("diet", "Diet"),
        FieldDef::new("birth_location", "Birth Location"),
        FieldDef::new("birth_location_latitude", "Birth Location Latitude"),
        FieldDef::new("birth_location_latitude_unit", "Birth Location Latitude Unit"),
        FieldDef::new("birth_location_longitude", "Birth Location Longitude"),
        FieldDef::new("birth_location_longitude_unit", "Birth Location Longitude Unit"),
        FieldDef::new("birth_weight", "Birth Weight"),
        FieldDef::new("birth_weight_unit", "Birth Weight Unit"),
        FieldDef::new("placental_weight", "Placental Weight"),
        FieldDef::new("placental_weight_unit", "Placental Weight Unit"),
        FieldDef::new("pregnancy_length", "Pregnancy Length"),
        FieldDef::new("pregnancy_length_unit", "Pregnancy Length Unit"),
        FieldDef::new("delivery_timing", "Delivery Timing"),
        FieldDef::new("delivery_ease", "Delivery Ease"),
        FieldDef::new("child_of", "Child Of"),
        FieldDef::new("pedigree", "Pedigree"),
    ]);

    let mut rules = standard::rules(standard::MATERIALS, false);
    rules.extend([
        Rule::Required("organism"),
        Rule::Required("organism_term_source_id"),
        Rule::Required("sex"),
        Rule::Required("sex_term_source_id"),
        Rule::Recommended("birth_date"),
        Rule::Recommended("birth_date_unit"),
        Rule::Recommended("breed"),
        Rule::Recommended("breed_term_source_id"),
        Rule::Recommended("health_status"),
        Rule::OneOf { field: "birth_date_unit", allowed: BIRTH_DATE_UNITS },
        Rule::OneOf { field: "birth_location_latitude_unit", allowed: DEGREES },
        Rule::OneOf { field: "birth_location_longitude_unit", allowed: DEGREES },
        Rule::OneOf { field: "birth_weight_unit", allowed: WEIGHT_UNITS },
        Rule::OneOf { field: "placental_weight_unit", allowed: WEIGHT_UNITS },
        Rule::OneOf { field: "pregnancy_length_unit", allowed: PREGNANCY_LENGTH_UNITS },
        Rule::OneOf { field: "delivery_timing", allowed: DELIVERY_TIMINGS },
        Rule::OneOf { field: "delivery_ease", allowed: DELIVERY_EASE },
        Rule::ObjectList("health_status"),
        Rule::SubFields { field: "health_status", required: &["text", "term"] },
        Rule::MaxItems {
            field: "child_of",
            max: 2,
            message: "Organism can have at most 2 parents",
        },
        Rule::Numeric {
            field: "birth_location_latitude",
            label: "Latitude",
            range: Some((-90.0, 90.0)),
            unit: "degrees",
        },
        Rule::Numeric {
            field: "birth_location_longitude",
            label: "Longitude",
            range: Some((-180.0, 180.0)),
            unit: "degrees",
        },
        Rule::Numeric { field: "birth_weight", label: "Value", range: None, unit: "" },
        Rule::Numeric { field: "placental_weight", label: "Value", range: None, unit: "" },
        Rule::Numeric { field: "pregnancy_length", label: "Value", range: None, unit: "" },
        Rule::DateByUnit {
            field: "birth_date",
            unit_field: "birth_date_unit",
            label: "birth date",
        },
        Rule::UrlPrefix {
            field: "pedigree",
            prefixes: URL_PREFIXES,
            message: "Pedigree must be a valid URL starting with http:// or https://",
        },
        Rule::Paired { text: "breed", term: "breed_term_source_id", label: "Breed" },
        Rule::Ontology(OntologyRule {
            field: "organism_term_source_id",
            sub_field: None,
            label_field: None,
            subject: "Organism",
            namespaces: &["NCBITaxon"],
            vocabulary: Some("NCBITaxon"),
            allowed_classes: &["NCBITaxon"],
        }),
        Rule::Ontology(OntologyRule {
            field: "sex_term_source_id",
            sub_field: None,
            label_field: None,
            subject: "Sex",
            namespaces: &["PATO"],
            vocabulary: Some("PATO"),
            allowed_classes: &["PATO:0000047"],
        }),
        Rule::Ontology(OntologyRule {
            field: "breed_term_source_id",
            sub_field: None,
            label_field: Some("breed"),
            subject: "Breed",
            namespaces: &["LBO"],
            vocabulary: Some("LBO"),
            allowed_classes: &["LBO"],
        }),
        Rule::Ontology(OntologyRule {
            field: "health_status",
            sub_field: Some("term"),
            label_field: Some("text"),
            subject: "Health status",
            namespaces: &["PATO", "EFO"],
            vocabulary: None,
            allowed_classes: &["PATO:0000461", "EFO:0000408"],
        }),
        Rule::BreedSpecies(BreedSpeciesRule {
            species_text: "organism",
            species_term: "organism_term_source_id",
            breed_text: "breed",
            breed_term: "breed_term_source_id",
        }),
    ]);

    RuleSet {
        kind: SampleKind::Organism,
        fields,
        nested: vec![
            FieldDef::new("health_status.text", "Health Status"),
            FieldDef::new("health_status.term", "Health Status Term Source ID"),
        ],
        rules,
        relationship: Some(RelationshipSpec {
            field: "child_of",
            species_field: Some("organism"),
            allowed_parent_materials: &["organism"],
        }),
    }
});
