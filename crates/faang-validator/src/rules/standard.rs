//! Core fields and rules shared by every sample kind.

use super::{FieldDef, Rule};

/// Accepted materials.
pub const MATERIALS: &[&str] = &[
    "organism",
    "specimen from organism",
    "cell specimen",
    "single cell specimen",
    "pool of specimens",
    "cell culture",
    "cell line",
    "organoid",
    "restricted access",
];

/// Material to its ontology term.
pub const MATERIAL_TERMS: &[(&str, &str)] = &[
    ("organism", "OBI_0100026"),
    ("specimen from organism", "OBI_0001479"),
    ("cell specimen", "OBI_0001468"),
    ("single cell specimen", "OBI_0002127"),
    ("pool of specimens", "OBI_0302716"),
    ("cell culture", "OBI_0001876"),
    ("cell line", "CLO_0000031"),
    ("organoid", "NCIT_C172259"),
    ("restricted access", "restricted access"),
];

const MATERIAL_TERM_IDS: &[&str] = &[
    "OBI_0100026",
    "OBI_0001479",
    "OBI_0001468",
    "OBI_0002127",
    "OBI_0302716",
    "OBI_0001876",
    "CLO_0000031",
    "NCIT_C172259",
    "restricted access",
];

const PROJECTS: &[&str] = &["FAANG"];

/// Accepted secondary projects.
pub const SECONDARY_PROJECTS: &[&str] = &[
    "AQUA-FAANG",
    "BovReg",
    "GENE-SWitCH",
    "Bovine-FAANG",
    "EFFICACE",
    "GEroNIMO",
    "RUMIGEN",
    "Equine-FAANG",
    "Holoruminant",
    "USPIGFAANG",
];

const AVAILABILITY_PREFIXES: &[&str] = &["http://", "https://", "mailto:"];

/// Core fields. Organisms name the material term column "Term Source ID";
/// specimen-like kinds use "Material Term Source ID".
pub(crate) fn fields(material_term_column: &'static str) -> Vec<FieldDef> {
    vec![
        FieldDef::new("sample_name", "Sample Name"),
        FieldDef::new("sample_description", "Sample Description"),
        FieldDef::new("material", "Material"),
        FieldDef::new("term_source_id", material_term_column),
        FieldDef::new("project", "Project"),
        FieldDef::new("secondary_project", "Secondary Project"),
        FieldDef::new("availability", "Availability"),
        FieldDef::new("same_as", "Same as"),
    ]
}

/// Core rules.
///
/// `materials` narrows the material enumeration for kinds bound to one
/// material; `list_secondary` requires Secondary Project to be a list.
pub(crate) fn rules(materials: &'static [&'static str], list_secondary: bool) -> Vec<Rule> {
    let mut rules = vec![
        Rule::Required("sample_name"),
        Rule::Required("material"),
        Rule::Required("term_source_id"),
        Rule::Required("project"),
        Rule::OneOf {
            field: "material",
            allowed: materials,
        },
        Rule::OneOf {
            field: "term_source_id",
            allowed: MATERIAL_TERM_IDS,
        },
        Rule::OneOf {
            field: "project",
            allowed: PROJECTS,
        },
        Rule::OneOf {
            field: "secondary_project",
            allowed: SECONDARY_PROJECTS,
        },
        Rule::UrlPrefix {
            field: "availability",
            prefixes: AVAILABILITY_PREFIXES,
            message: "Availability must be a web URL or email address with 'mailto:' prefix",
        },
        Rule::MatchesCompanion {
            field: "term_source_id",
            companion: "material",
            pairs: MATERIAL_TERMS,
        },
    ];
    if list_secondary {
        rules.push(Rule::ListShape("secondary_project"));
    }
    rules
}
