//! Term authority trait and the OLS implementation.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, ValidatorError};
use crate::lookup::{LookupFailure, LookupResult};

use super::term::{normalize_term, TermCandidate, TermId, TermRecord};

/// Default Ontology Lookup Service base URL.
pub const DEFAULT_OLS_URL: &str = "https://www.ebi.ac.uk/ols4";

/// Source of truth for controlled-vocabulary terms.
///
/// One `lookup` is one logical query: it returns the term's labels and its
/// hierarchical ancestors together.
pub trait TermAuthority: Send + Sync {
    /// Look up a term.
    fn lookup(&self, term: &TermId) -> LookupResult<TermRecord>;

    /// Short name used in messages ("OLS").
    fn name(&self) -> &str;
}

/// Client for the EBI Ontology Lookup Service.
pub struct OlsClient {
    client: Client,
    base_url: String,
}

impl OlsClient {
    /// Create a client against the public OLS instance.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(DEFAULT_OLS_URL, timeout)
    }

    /// Create a client against a custom OLS instance.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ValidatorError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL in use.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search(&self, term: &TermId) -> LookupResult<Vec<SearchDoc>> {
        let url = format!("{}/api/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", term.underscored()), ("rows", "100".to_string())])
            .send()
            .map_err(|e| LookupFailure::from_reqwest(&e))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(if status == reqwest::StatusCode::NOT_FOUND {
                LookupFailure::NotFound
            } else {
                LookupFailure::Transport(format!("OLS search returned {}", status))
            });
        }

        let body: SearchResponse = response
            .json()
            .map_err(|e| LookupFailure::Malformed(e.to_string()))?;
        Ok(body.response.docs)
    }

    fn ancestors(&self, term: &TermId, ontology: &str) -> LookupResult<Vec<String>> {
        let url = format!(
            "{}/api/ontologies/{}/terms/{}/hierarchicalAncestors",
            self.base_url,
            ontology.to_lowercase(),
            double_encode_iri(&term.iri())
        );
        let response = self
            .client
            .get(&url)
            .query(&[("size", "500")])
            .send()
            .map_err(|e| LookupFailure::from_reqwest(&e))?;

        // Root terms have no ancestors resource.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(LookupFailure::Transport(format!(
                "OLS ancestors returned {}",
                response.status()
            )));
        }

        let body: AncestorsResponse = response
            .json()
            .map_err(|e| LookupFailure::Malformed(e.to_string()))?;
        Ok(body
            .embedded
            .map(|e| e.terms)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| t.obo_id)
            .map(|id| normalize_term(&id))
            .collect())
    }
}

impl TermAuthority for OlsClient {
    fn lookup(&self, term: &TermId) -> LookupResult<TermRecord> {
        let canonical = term.canonical();
        let docs: Vec<SearchDoc> = self
            .search(term)?
            .into_iter()
            .filter(|doc| {
                doc.obo_id
                    .as_deref()
                    .is_some_and(|id| normalize_term(id).eq_ignore_ascii_case(&canonical))
            })
            .collect();

        if docs.is_empty() {
            return Err(LookupFailure::NotFound);
        }

        // Prefer the ontology that defines the term over ones that import it.
        let defining = docs
            .iter()
            .find(|d| d.ontology_name.eq_ignore_ascii_case(term.namespace()))
            .unwrap_or(&docs[0])
            .ontology_name
            .clone();

        // Only a 404 means "no ancestors"; any other failure fails the lookup.
        let ancestors = self.ancestors(term, &defining).map_err(|failure| {
            warn!("Could not fetch ancestors of {}: {}", canonical, failure);
            match failure {
                LookupFailure::NotFound => {
                    LookupFailure::Transport("OLS ancestors not found".to_string())
                }
                other => other,
            }
        })?;
        debug!(
            "Resolved {} via OLS ({} labels, {} ancestors)",
            canonical,
            docs.len(),
            ancestors.len()
        );

        Ok(TermRecord {
            candidates: docs
                .into_iter()
                .map(|d| TermCandidate::new(d.label, d.ontology_name))
                .collect(),
            ancestors,
        })
    }

    fn name(&self) -> &str {
        "OLS"
    }
}

/// OLS expects the term IRI URL-encoded twice in path segments.
fn double_encode_iri(iri: &str) -> String {
    iri.replace(':', "%253A").replace('/', "%252F")
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: SearchBody,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    #[serde(default)]
    label: String,
    #[serde(default)]
    ontology_name: String,
    #[serde(default)]
    obo_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AncestorsResponse {
    #[serde(rename = "_embedded")]
    embedded: Option<AncestorTerms>,
}

#[derive(Debug, Deserialize)]
struct AncestorTerms {
    #[serde(default)]
    terms: Vec<AncestorTerm>,
}

#[derive(Debug, Deserialize)]
struct AncestorTerm {
    obo_id: Option<String>,
}
