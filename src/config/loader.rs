//! Ledger configuration file loader
//! Reads the JSON-RPC endpoint parameters from a YAML file once at startup

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

use crate::error::EcoHotelError;

/// Connection parameters for the ledger network.
///
/// Loaded once by `main` and handed to collaborators behind an `Arc`, so every
/// consumer in the process observes the same instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    #[serde(rename = "API-URL", alias = "api_url")]
    api_url: String,
    #[serde(rename = "API-KEY", alias = "api_key")]
    api_key: String,
    /// EIP-155 chain id; legacy unprotected signatures when absent.
    #[serde(rename = "CHAIN-ID", alias = "chain_id", default)]
    chain_id: Option<u64>,
}

impl LedgerConfig {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            chain_id: None,
        }
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Load and parse the YAML file at `path`
    pub fn load(path: &Path) -> Result<Self, EcoHotelError> {
        info!("Loading ledger configuration from: {:?}", path);

        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => EcoHotelError::ConfigError(format!(
                "Impossible to find {:?}; place the ledger configuration file there and start again",
                path
            )),
            ErrorKind::PermissionDenied => EcoHotelError::ConfigError(format!(
                "Permission denied reading {:?}; grant read access and start again",
                path
            )),
            _ => EcoHotelError::ConfigError(format!("Failed to read {:?}: {}", path, e)),
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            EcoHotelError::ConfigError(format!("Failed to parse {:?}: {}", path, e))
        })?;

        if config.api_url.trim().is_empty() {
            return Err(EcoHotelError::ConfigError(format!(
                "{:?}: API-URL must not be empty",
                path
            )));
        }

        Ok(config)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// JSON-RPC endpoint: the URL with the access key appended verbatim.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.api_url, self.api_key)
    }
}
