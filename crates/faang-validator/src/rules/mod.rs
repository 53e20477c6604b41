//! Per-kind rule tables.
//!
//! Rules are plain data: each [`RuleSet`] lists the fields of one sample kind
//! and the [`Rule`]s that apply to them. A single interpreter, the
//! [`FieldRuleEvaluator`](crate::FieldRuleEvaluator), walks the rules in
//! [`Phase`] order.

mod standard;
mod organism;
mod organoid;
mod teleost_embryo;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidatorError};
use crate::validation::ErrorClass;

pub use self::standard::{MATERIAL_TERMS, MATERIALS, SECONDARY_PROJECTS};

/// Kind of sample a batch holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleKind {
    Organism,
    Organoid,
    TeleostEmbryo,
}

impl SampleKind {
    /// All supported kinds.
    pub fn all() -> &'static [SampleKind] {
        &[
            SampleKind::Organism,
            SampleKind::Organoid,
            SampleKind::TeleostEmbryo,
        ]
    }

    /// Machine name, also the key used in keyed JSON batches.
    pub fn name(&self) -> &'static str {
        match self {
            SampleKind::Organism => "organism",
            SampleKind::Organoid => "organoid",
            SampleKind::TeleostEmbryo => "teleost_embryo",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SampleKind::Organism => "Organism",
            SampleKind::Organoid => "Organoid",
            SampleKind::TeleostEmbryo => "Teleost Embryo",
        }
    }

    /// Material every record of this kind declares.
    pub fn material(&self) -> &'static str {
        match self {
            SampleKind::Organism => "organism",
            SampleKind::Organoid => "organoid",
            SampleKind::TeleostEmbryo => "specimen from organism",
        }
    }

    /// Rule table for this kind.
    pub fn rules(&self) -> &'static RuleSet {
        match self {
            SampleKind::Organism => &organism::RULES,
            SampleKind::Organoid => &organoid::RULES,
            SampleKind::TeleostEmbryo => &teleost_embryo::RULES,
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleKind {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "organism" | "organisms" => Ok(SampleKind::Organism),
            "organoid" | "organoids" => Ok(SampleKind::Organoid),
            "teleost_embryo" | "teleost_embryos" => Ok(SampleKind::TeleostEmbryo),
            _ => Err(ValidatorError::UnknownSampleKind(s.to_string())),
        }
    }
}

/// A field of a sample kind: internal name and spreadsheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub column: &'static str,
}

impl FieldDef {
    pub const fn new(name: &'static str, column: &'static str) -> Self {
        Self { name, column }
    }
}

/// Evaluation phase. Rules run in ascending phase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Presence,
    Conditional,
    Enumeration,
    Shape,
    Numeric,
    Pattern,
    Consistency,
    Ontology,
}

impl Phase {
    /// Error class reported by rules of this phase.
    pub fn error_class(&self) -> ErrorClass {
        match self {
            Phase::Conditional => ErrorClass::ConditionalRequirement,
            Phase::Consistency => ErrorClass::Consistency,
            Phase::Ontology => ErrorClass::VocabularyResolution,
            _ => ErrorClass::Schema,
        }
    }
}

/// An ontology-bearing field.
#[derive(Debug, Clone)]
pub struct OntologyRule {
    /// Field holding the term id (or holding sub-objects that do).
    pub field: &'static str,
    /// Sub-object key of the term id, for list-of-object fields.
    pub sub_field: Option<&'static str>,
    /// Field (or sub-object key) holding the human label to compare against.
    pub label_field: Option<&'static str>,
    /// Subject named in namespace errors ("Organism term ...").
    pub subject: &'static str,
    /// Accepted term namespaces.
    pub namespaces: &'static [&'static str],
    /// Vocabulary whose labels are compared; `None` uses the term's namespace.
    pub vocabulary: Option<&'static str>,
    /// Allowed classes: a bare namespace or a class id the term must descend from.
    pub allowed_classes: &'static [&'static str],
}

/// Breed-versus-species check between two ontology-bearing field pairs.
#[derive(Debug, Clone, Copy)]
pub struct BreedSpeciesRule {
    pub species_text: &'static str,
    pub species_term: &'static str,
    pub breed_text: &'static str,
    pub breed_term: &'static str,
}

/// One validation rule.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Absence is an error.
    Required(&'static str),
    /// Absence is a warning.
    Recommended(&'static str),
    /// Required unless `trigger` holds one of `exempt` (or is itself absent).
    RequiredUnless {
        field: &'static str,
        trigger: &'static str,
        exempt: &'static [&'static str],
    },
    /// Value (or every list entry) must be in `allowed`. Case-sensitive.
    OneOf {
        field: &'static str,
        allowed: &'static [&'static str],
    },
    /// Value must be a list.
    ListShape(&'static str),
    /// Value must be a list of sub-objects.
    ObjectList(&'static str),
    /// List may hold at most `max` non-blank entries.
    MaxItems {
        field: &'static str,
        max: usize,
        message: &'static str,
    },
    /// Value must parse as a number, optionally within `[min, max]`.
    Numeric {
        field: &'static str,
        label: &'static str,
        range: Option<(f64, f64)>,
        unit: &'static str,
    },
    /// Date checked against the pattern named by a companion unit field.
    DateByUnit {
        field: &'static str,
        unit_field: &'static str,
        label: &'static str,
    },
    /// Value must match `regex` unless it is one of `exempt`.
    Pattern {
        field: &'static str,
        regex: &'static Lazy<Regex>,
        exempt: &'static [&'static str],
        hint: &'static str,
    },
    /// Value must start with one of `prefixes`.
    UrlPrefix {
        field: &'static str,
        prefixes: &'static [&'static str],
        message: &'static str,
    },
    /// Label text and its term id must be provided together.
    Paired {
        text: &'static str,
        term: &'static str,
        label: &'static str,
    },
    /// `field` must equal the value `pairs` maps `companion`'s value to.
    MatchesCompanion {
        field: &'static str,
        companion: &'static str,
        pairs: &'static [(&'static str, &'static str)],
    },
    /// Every sub-object must carry non-blank `required` keys.
    SubFields {
        field: &'static str,
        required: &'static [&'static str],
    },
    /// Term id resolved against the term authority.
    Ontology(OntologyRule),
    /// Breed term must sit under the species' breed class.
    BreedSpecies(BreedSpeciesRule),
}

impl Rule {
    /// Phase the rule belongs to.
    pub fn phase(&self) -> Phase {
        match self {
            Rule::Required(_) | Rule::Recommended(_) => Phase::Presence,
            Rule::RequiredUnless { .. } => Phase::Conditional,
            Rule::OneOf { .. } => Phase::Enumeration,
            Rule::ListShape(_)
            | Rule::ObjectList(_)
            | Rule::MaxItems { .. }
            | Rule::SubFields { .. } => Phase::Shape,
            Rule::Numeric { .. } => Phase::Numeric,
            Rule::DateByUnit { .. } | Rule::Pattern { .. } | Rule::UrlPrefix { .. } => {
                Phase::Pattern
            }
            Rule::Paired { .. } | Rule::MatchesCompanion { .. } => Phase::Consistency,
            Rule::Ontology(_) | Rule::BreedSpecies(_) => Phase::Ontology,
        }
    }
}

/// How records of a kind reference their parents.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipSpec {
    /// Field holding parent references.
    pub field: &'static str,
    /// Field holding species text, compared between child and parent.
    pub species_field: Option<&'static str>,
    /// Materials a parent may declare.
    pub allowed_parent_materials: &'static [&'static str],
}

/// Fields, rules and relationship settings of one sample kind.
#[derive(Debug)]
pub struct RuleSet {
    pub kind: SampleKind,
    pub fields: Vec<FieldDef>,
    /// Nested path aliases, e.g. `health_status.term`.
    pub nested: Vec<FieldDef>,
    pub rules: Vec<Rule>,
    pub relationship: Option<RelationshipSpec>,
}

impl RuleSet {
    /// Rule table for a kind.
    pub fn for_kind(kind: SampleKind) -> &'static RuleSet {
        kind.rules()
    }

    /// Column display name of an internal field, or the name itself.
    pub fn column<'a>(&self, name: &'a str) -> &'a str {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.column)
            .unwrap_or(name)
    }

    /// Internal field name of a column.
    pub fn field_for_column(&self, column: &str) -> Option<&'static str> {
        self.fields.iter().find(|f| f.column == column).map(|f| f.name)
    }

    /// Rules in evaluation order. Declaration order is kept within a phase.
    pub fn ordered_rules(&self) -> Vec<&Rule> {
        let mut rules: Vec<&Rule> = self.rules.iter().collect();
        rules.sort_by_key(|r| r.phase());
        rules
    }

    /// Columns whose absence is an error.
    pub fn required_columns(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter_map(|r| match r {
                Rule::Required(field) => Some(self.column(*field)),
                _ => None,
            })
            .collect()
    }

    /// Columns whose absence is a warning.
    pub fn recommended_columns(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter_map(|r| match r {
                Rule::Recommended(field) => Some(self.column(*field)),
                _ => None,
            })
            .collect()
    }
}
