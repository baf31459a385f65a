//! Ledger Integration Module
//!
//! Writes opaque payloads (report hashes) to an Ethereum-compatible network
//! as zero-value transactions, giving a third-party-verifiable record that a
//! report existed with a given content.
//!
//! Submission is fire-and-forget: no receipt wait, no retry, no nonce
//! management beyond asking the node for the current count.

pub mod client;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LedgerConfig;

pub use client::BlockchainWriter;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("transport failure: {0}")]
    Transport(reqwest::Error),

    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("empty result from {0}")]
    EmptyResult(String),

    #[error("invalid quantity {value:?} returned by {method}")]
    InvalidQuantity { method: String, value: String },

    #[error("signing failed: {0}")]
    Signing(String),
}

// The request URL embeds the access key, so it never reaches an error message.
impl From<reqwest::Error> for LedgerError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

/// Identifier of a submitted transaction, as returned by the node (`0x`-prefixed hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A signing identity able to put a payload on the ledger.
#[async_trait]
pub trait LedgerWriter: Send + Sync {
    /// Address of the signing account.
    fn address(&self) -> String;

    /// Submit `payload` as transaction data and return the transaction id.
    async fn submit(&self, payload: &[u8]) -> Result<TransactionId, LedgerError>;
}

/// Produces a fresh [`LedgerWriter`] for each use.
pub trait LedgerConnector: Send + Sync {
    fn connect(&self) -> Result<Box<dyn LedgerWriter>, LedgerError>;
}

/// Connects to the configured JSON-RPC endpoint. Every connection is a new
/// [`BlockchainWriter`] with its own freshly generated key pair.
#[derive(Debug, Clone)]
pub struct EthereumConnector {
    config: Arc<LedgerConfig>,
}

impl EthereumConnector {
    pub fn new(config: Arc<LedgerConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Arc<LedgerConfig> {
        &self.config
    }
}

impl LedgerConnector for EthereumConnector {
    fn connect(&self) -> Result<Box<dyn LedgerWriter>, LedgerError> {
        Ok(Box::new(BlockchainWriter::new(&self.config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_id_display_and_serde() {
        let id = TransactionId::new("0xabc");
        assert_eq!(id.to_string(), "0xabc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0xabc\"");
        assert_eq!(id.into_inner(), "0xabc");
    }

    #[test]
    fn test_connector_shares_config_instance() {
        let config = Arc::new(LedgerConfig::new("http://localhost:8545/", ""));
        let connector = EthereumConnector::new(Arc::clone(&config));
        assert!(Arc::ptr_eq(connector.config(), &config));
    }

    #[test]
    fn test_each_connection_has_new_identity() {
        let connector = EthereumConnector::new(Arc::new(LedgerConfig::new("http://localhost:8545/", "")));
        let first = connector.connect().unwrap();
        let second = connector.connect().unwrap();
        assert_ne!(first.address(), second.address());
    }
}
