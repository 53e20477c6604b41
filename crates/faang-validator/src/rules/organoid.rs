//! Organoid rule table.

use once_cell::sync::Lazy;

use super::{standard, FieldDef, OntologyRule, RelationshipSpec, Rule, RuleSet, SampleKind};

const FREEZING_METHODS: &[&str] = &[
    "ambient temperature",
    "cut slide",
    "fresh",
    "frozen, -70 freezer",
    "frozen, -150 freezer",
    "frozen, liquid nitrogen",
    "frozen, vapor phase",
    "paraffin block",
    "RNAlater, frozen",
    "TRIzol, frozen",
];
const FRESH: &[&str] = &["fresh"];
const CULTURE_TYPES: &[&str] = &["2D", "3D"];
const GROWTH_ENVIRONMENTS: &[&str] = &["matrigel", "liquid suspension", "adherent"];
const DATE_UNITS: &[&str] = &["YYYY-MM-DD", "YYYY-MM", "YYYY", "restricted access"];
const TEMPERATURE_UNITS: &[&str] = &["Celsius", "Fahrenheit", "Kelvin"];
const ORGAN_NAMESPACES: &[&str] = &["UBERON", "BTO"];

pub(crate) static RULES: Lazy<RuleSet> = Lazy::new(|| {
    let mut fields = standard::fields("Material Term Source ID");
    fields.extend([
        FieldDef::new("organ_model", "Organ Model"),
        FieldDef::new("organ_model_term_source_id", "Organ Model Term Source ID"),
        FieldDef::new("organ_part_model", "Organ Part Model"),
        FieldDef::new("organ_part_model_term_source_id", "Organ Part Model Term Source ID"),
        FieldDef::new("freezing_date", "Freezing Date"),
        FieldDef::new("freezing_date_unit", "Freezing Date Unit"),
        FieldDef::new("freezing_method", "Freezing Method"),
        FieldDef::new("freezing_protocol", "Freezing Protocol"),
        FieldDef::new("number_of_frozen_cells", "Number Of Frozen Cells"),
        FieldDef::new("number_of_frozen_cells_unit", "Number Of Frozen Cells Unit"),
        FieldDef::new("organoid_culture_and_passage_protocol", "Organoid Culture And Passage Protocol"),
        FieldDef::new("organoid_passage", "Organoid Passage"),
        FieldDef::new("organoid_passage_unit", "Organoid Passage Unit"),
        FieldDef::new("organoid_passage_protocol", "Organoid Passage Protocol"),
        FieldDef::new("type_of_organoid_culture", "Type Of Organoid Culture"),
        FieldDef::new("organoid_morphology", "Organoid Morphology"),
        FieldDef::new("growth_environment", "Growth Environment"),
        FieldDef::new("stored_oxygen_level", "Stored Oxygen Level"),
        FieldDef::new("stored_oxygen_level_unit", "Stored Oxygen Level Unit"),
        FieldDef::new("incubation_temperature", "Incubation Temperature"),
        FieldDef::new("incubation_temperature_unit", "Incubation Temperature Unit"),
        FieldDef::new("derived_from", "Derived From"),
    ]);

    let mut rules = standard::rules(&["organoid"], true);
    rules.extend([
        Rule::Required("organ_model"),
        Rule::Required("organ_model_term_source_id"),
        Rule::Required("freezing_method"),
        Rule::Required("organoid_passage"),
        Rule::Required("organoid_passage_unit"),
        Rule::Required("organoid_passage_protocol"),
        Rule::Required("type_of_organoid_culture"),
        Rule::Required("growth_environment"),
        Rule::Required("derived_from"),
        Rule::RequiredUnless { field: "freezing_date", trigger: "freezing_method", exempt: FRESH },
        Rule::RequiredUnless { field: "freezing_date_unit", trigger: "freezing_method", exempt: FRESH },
        Rule::RequiredUnless { field: "freezing_protocol", trigger: "freezing_method", exempt: FRESH },
        Rule::OneOf { field: "freezing_method", allowed: FREEZING_METHODS },
        Rule::OneOf { field: "freezing_date_unit", allowed: DATE_UNITS },
        Rule::OneOf { field: "organoid_passage_unit", allowed: &["passages"] },
        Rule::OneOf { field: "type_of_organoid_culture", allowed: CULTURE_TYPES },
        Rule::OneOf { field: "growth_environment", allowed: GROWTH_ENVIRONMENTS },
        Rule::OneOf { field: "number_of_frozen_cells_unit", allowed: &["organoids"] },
        Rule::OneOf { field: "stored_oxygen_level_unit", allowed: &["%"] },
        Rule::OneOf { field: "incubation_temperature_unit", allowed: TEMPERATURE_UNITS },
        Rule::Numeric { field: "organoid_passage", label: "Organoid Passage", range: None, unit: "" },
        Rule::Numeric {
            field: "number_of_frozen_cells",
            label: "Number Of Frozen Cells",
            range: None,
            unit: "",
        },
        Rule::Numeric {
            field: "stored_oxygen_level",
            label: "Stored Oxygen Level",
            range: Some((0.0, 100.0)),
            unit: "%",
        },
        Rule::Numeric {
            field: "incubation_temperature",
            label: "Incubation Temperature",
            range: None,
            unit: "",
        },
        Rule::DateByUnit {
            field: "freezing_date",
            unit_field: "freezing_date_unit",
            label: "freezing date",
        },
        Rule::Paired {
            text: "organ_part_model",
            term: "organ_part_model_term_source_id",
            label: "Organ Part Model",
        },
        Rule::Ontology(OntologyRule {
            field: "organ_model_term_source_id",
            sub_field: None,
            label_field: Some("organ_model"),
            subject: "Organ model",
            namespaces: ORGAN_NAMESPACES,
            vocabulary: None,
            allowed_classes: ORGAN_NAMESPACES,
        }),
        Rule::Ontology(OntologyRule {
            field: "organ_part_model_term_source_id",
            sub_field: None,
            label_field: Some("organ_part_model"),
            subject: "Organ part model",
            namespaces: ORGAN_NAMESPACES,
            vocabulary: None,
            allowed_classes: ORGAN_NAMESPACES,
        }),
    ]);

    RuleSet {
        kind: SampleKind::Organoid,
        fields,
        nested: Vec::new(),
        rules,
        relationship: Some(RelationshipSpec {
            field: "derived_from",
            species_field: None,
            allowed_parent_materials: &["specimen from organism", "organoid"],
        }),
    }
});
