//! Remote sample repository (BioSamples) access.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ValidatorError};
use crate::lookup::{LookupCache, LookupFailure, LookupResult};

/// Default BioSamples base URL.
pub const DEFAULT_BIOSAMPLES_URL: &str = "https://www.ebi.ac.uk/biosamples";

/// Prefix marking a parent reference as a BioSamples accession.
pub const REMOTE_ID_PREFIX: &str = "SAM";

/// Relationship types that point from a sample to its parent.
const PARENT_RELATIONSHIPS: &[&str] = &["child of", "derived from"];

/// What the repository knows about a remote sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub accession: String,
    /// Organism text, e.g. `Bos taurus`.
    pub organism: Option<String>,
    /// Material text, e.g. `organism`.
    pub material: Option<String>,
    /// Accessions this sample lists as its own parents.
    pub parents: Vec<String>,
}

impl RemoteEntry {
    pub fn new(accession: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            ..Self::default()
        }
    }

    pub fn with_organism(mut self, organism: impl Into<String>) -> Self {
        self.organism = Some(organism.into());
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parents.push(parent.into());
        self
    }

    /// Parse a BioSamples JSON document.
    pub fn from_biosamples_json(accession: &str, json: &Value) -> Self {
        let characteristic = |name: &str| {
            json.get("characteristics")
                .and_then(|c| c.get(name))
                .and_then(|v| v.get(0))
                .and_then(|v| v.get("text"))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let parents = json
            .get("relationships")
            .and_then(Value::as_array)
            .map(|relationships| {
                relationships
                    .iter()
                    .filter(|r| r.get("source").and_then(Value::as_str) == Some(accession))
                    .filter(|r| {
                        r.get("type")
                            .and_then(Value::as_str)
                            .is_some_and(|t| PARENT_RELATIONSHIPS.contains(&t.to_lowercase().as_str()))
                    })
                    .filter_map(|r| r.get("target").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            accession: accession.to_string(),
            organism: characteristic("organism"),
            material: characteristic("material"),
            parents,
        }
    }
}

/// Cache of remote entries keyed by accession.
pub type RemoteEntryCache = LookupCache<RemoteEntry>;

/// Source of remote sample metadata.
pub trait SampleRepository: Send + Sync {
    /// Fetch one sample by accession.
    fn fetch(&self, accession: &str) -> LookupResult<RemoteEntry>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

/// Whether a parent reference names a remote accession.
pub fn is_remote_id(reference: &str) -> bool {
    reference.starts_with(REMOTE_ID_PREFIX)
}

/// Client for the EBI BioSamples REST API.
pub struct BioSamplesClient {
    client: Client,
    base_url: String,
}

impl BioSamplesClient {
    /// Create a client against the public BioSamples instance.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(DEFAULT_BIOSAMPLES_URL, timeout)
    }

    /// Create a client against a custom instance.
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
}

impl SampleRepository for BioSamplesClient {
    fn fetch(&self, accession: &str) -> LookupResult<RemoteEntry> {
        let url = format!("{}/samples/{}", self.base_url, accession);
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| LookupFailure::from_reqwest(&e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupFailure::NotFound);
        }
        if !status.is_success() {
            return Err(LookupFailure::Transport(format!("BioSamples returned {}", status)));
        }

        let json: Value = response
            .json()
            .map_err(|e| LookupFailure::Malformed(e.to_string()))?;
        Ok(RemoteEntry::from_biosamples_json(accession, &json))
    }

    fn name(&self) -> &str {
        "BioSamples"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_biosamples_document() {
        let doc = json!({
            "accession": "SAMEA7765087",
            "characteristics": {
                "organism": [{"text": "Bos taurus", "ontologyTerms": ["http://purl.obolibrary.org/obo/NCBITaxon_9913"]}],
                "material": [{"text": "organism"}]
            },
            "relationships": [
                {"source": "SAMEA7765087", "type": "child of", "target": "SAMEA7765001"},
                {"source": "SAMEA7765087", "type": "same as", "target": "SAMEA0000001"},
                {"source": "SAMEA9999999", "type": "child of", "target": "SAMEA7765087"},
                {"source": "SAMEA7765087", "type": "Derived From", "target": "SAMEA7765002"}
            ]
        });

        let entry = RemoteEntry::from_biosamples_json("SAMEA7765087", &doc);
        assert_eq!(entry.organism.as_deref(), Some("Bos taurus"));
        assert_eq!(entry.material.as_deref(), Some("organism"));
        assert_eq!(entry.parents, vec!["SAMEA7765001".to_string(), "SAMEA7765002".to_string()]);
    }

    #[test]
    fn test_parse_sparse_document() {
        let entry = RemoteEntry::from_biosamples_json("SAMEA1", &json!({}));
        assert_eq!(entry, RemoteEntry::new("SAMEA1"));
    }

    #[test]
    fn test_remote_id_prefix() {
        assert!(is_remote_id("SAMEA7765087"));
        assert!(is_remote_id("SAMN02953681"));
        assert!(!is_remote_id("ECA_UKY_H11"));
        assert!(!is_remote_id("sameA1"));
    }

    #[test]
    fn test_client_base_url() {
        let client = BioSamplesClient::with_base_url("http://localhost:9000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
        assert_eq!(client.name(), "BioSamples");
    }
}
