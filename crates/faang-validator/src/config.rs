//! Validator configuration.

use std::time::Duration;

use crate::error::{Result, ValidatorError};
use crate::ontology::DEFAULT_OLS_URL;
use crate::relationship::DEFAULT_BIOSAMPLES_URL;

/// Environment variable overriding the OLS base URL.
pub const ENV_OLS_URL: &str = "FAANG_OLS_URL";
/// Environment variable overriding the BioSamples base URL.
pub const ENV_BIOSAMPLES_URL: &str = "FAANG_BIOSAMPLES_URL";
/// Environment variable holding the HTTP timeout in seconds.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "FAANG_HTTP_TIMEOUT_SECS";
/// Environment variable capping the worker pool.
pub const ENV_MAX_WORKERS: &str = "FAANG_MAX_WORKERS";

/// Configuration for a [`SampleValidator`](crate::SampleValidator).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorConfig {
    /// Base URL of the Ontology Lookup Service.
    pub ols_base_url: String,
    /// Base URL of BioSamples.
    pub biosamples_base_url: String,
    /// Timeout applied to every external request.
    pub request_timeout: Duration,
    /// Worker cap for per-record evaluation (None = CPU count).
    pub max_workers: Option<usize>,
    /// Whether to run relationship validation.
    pub validate_relationships: bool,
    /// Whether to run ontology-bearing rules.
    pub validate_ontologies: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            ols_base_url: DEFAULT_OLS_URL.to_string(),
            biosamples_base_url: DEFAULT_BIOSAMPLES_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            max_workers: None,
            validate_relationships: true,
            validate_ontologies: true,
        }
    }
}

impl ValidatorConfig {
    /// Defaults overridden by `FAANG_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = value(ENV_OLS_URL) {
            config.ols_base_url = url;
        }
        if let Some(url) = value(ENV_BIOSAMPLES_URL) {
            config.biosamples_base_url = url;
        }
        if let Some(secs) = value(ENV_HTTP_TIMEOUT_SECS) {
            let secs: u64 = secs.parse().map_err(|_| {
                ValidatorError::Config(format!("{} must be a whole number, got '{}'", ENV_HTTP_TIMEOUT_SECS, secs))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(workers) = value(ENV_MAX_WORKERS) {
            let workers: usize = workers.parse().map_err(|_| {
                ValidatorError::Config(format!("{} must be a whole number, got '{}'", ENV_MAX_WORKERS, workers))
            })?;
            config.max_workers = Some(workers);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_ols_base_url(mut self, url: impl Into<String>) -> Self {
        self.ols_base_url = url.into();
        self
    }

    pub fn with_biosamples_base_url(mut self, url: impl Into<String>) -> Self {
        self.biosamples_base_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    pub fn with_relationships(mut self, enabled: bool) -> Self {
        self.validate_relationships = enabled;
        self
    }

    pub fn with_ontologies(mut self, enabled: bool) -> Self {
        self.validate_ontologies = enabled;
        self
    }

    /// Reject settings no run could use.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(ValidatorError::Config("request timeout must be positive".to_string()));
        }
        if self.max_workers == Some(0) {
            return Err(ValidatorError::Config("max workers must be at least 1".to_string()));
        }
        Ok(())
    }
}
