//! Ontology term identifiers and resolution results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Base IRI of OBO Foundry terms.
pub const OBO_IRI_PREFIX: &str = "http://purl.obolibrary.org/obo/";

/// A parsed ontology term id.
///
/// Both `NS:code` and `NS_code` spellings are accepted; the canonical form
/// uses the colon. Only the first separator splits, so
/// `NCBITaxon_9913` becomes `NCBITaxon:9913`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermId {
    namespace: String,
    code: String,
}

impl TermId {
    /// Parse a raw id. Returns `None` when no namespace/code split exists.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (namespace, code) = raw.split_once(':').or_else(|| raw.split_once('_'))?;
        let (namespace, code) = (namespace.trim(), code.trim());
        if namespace.is_empty() || code.is_empty() || namespace.contains(char::is_whitespace) {
            return None;
        }
        Some(Self {
            namespace: namespace.to_string(),
            code: code.to_string(),
        })
    }

    /// Namespace prefix, e.g. `PATO`.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Local code, e.g. `0000384`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// `NS:code` form, used as the cache key.
    pub fn canonical(&self) -> String {
        format!("{}:{}", self.namespace, self.code)
    }

    /// `NS_code` form, as used in OBO IRIs and search queries.
    pub fn underscored(&self) -> String {
        format!("{}_{}", self.namespace, self.code)
    }

    /// Full OBO IRI.
    pub fn iri(&self) -> String {
        format!("{}{}", OBO_IRI_PREFIX, self.underscored())
    }

    /// Whether the term belongs to `namespace` (case-insensitive).
    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.namespace.eq_ignore_ascii_case(namespace)
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.code)
    }
}

/// Normalize a raw id to its canonical form, or return it trimmed if it does
/// not parse.
pub fn normalize_term(raw: &str) -> String {
    TermId::parse(raw)
        .map(|id| id.canonical())
        .unwrap_or_else(|| raw.trim().to_string())
}

/// One label the authority holds for a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCandidate {
    pub label: String,
    /// Vocabulary the label comes from, e.g. `pato`.
    pub ontology_name: String,
}

impl TermCandidate {
    pub fn new(label: impl Into<String>, ontology_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ontology_name: ontology_name.into(),
        }
    }
}

/// What the authority knows about a term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub candidates: Vec<TermCandidate>,
    /// Canonical ids of hierarchical ancestors.
    pub ancestors: Vec<String>,
}

impl TermRecord {
    /// Whether `class` (canonical or underscored) is an ancestor.
    pub fn has_ancestor(&self, class: &str) -> bool {
        let class = normalize_term(class);
        self.ancestors.iter().any(|a| normalize_term(a) == class)
    }

    /// Labels from `vocabulary`, or all labels when none match it.
    pub fn labels_for(&self, vocabulary: &str) -> Vec<&str> {
        let matching: Vec<&str> = self
            .candidates
            .iter()
            .filter(|c| c.ontology_name.eq_ignore_ascii_case(vocabulary))
            .map(|c| c.label.as_str())
            .collect();
        if matching.is_empty() {
            self.candidates.iter().map(|c| c.label.as_str()).collect()
        } else {
            matching
        }
    }
}

/// Outcome of resolving one term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermResolution {
    pub term_id: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_label: Option<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl TermResolution {
    pub(crate) fn new(term_id: impl Into<String>) -> Self {
        Self {
            term_id: term_id.into(),
            found: false,
            matched_label: None,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Whether resolution raised no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}
