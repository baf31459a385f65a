//! Ethereum JSON-RPC ledger client
//!
//! Signs legacy transactions locally and pushes them through
//! `eth_sendRawTransaction`, so the node never holds the key.

use std::sync::atomic::{AtomicU64, Ordering};

use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, Bytes, TxKind, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use super::{LedgerError, LedgerWriter, TransactionId};
use crate::config::LedgerConfig;

/// Gas limit attached to every record transaction.
pub const GAS_LIMIT: u64 = 200_000;

/// Records go to the zero address; only the calldata matters.
pub const NULL_DESTINATION: Address = Address::ZERO;

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Ledger client bound to one ephemeral signing identity.
///
/// The key pair is generated in [`BlockchainWriter::new`] and dies with the
/// value; it is never persisted and the account is never funded by this
/// crate.
pub struct BlockchainWriter {
    endpoint: String,
    chain_id: Option<u64>,
    signer: PrivateKeySigner,
    http_client: Client,
    request_id: AtomicU64,
}

impl BlockchainWriter {
    pub fn new(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let signer = PrivateKeySigner::random();
        let http_client = Client::builder().build()?;

        debug!("Created ledger identity {}", signer.address());

        Ok(Self {
            endpoint: config.endpoint(),
            chain_id: config.chain_id(),
            signer,
            http_client,
            request_id: AtomicU64::new(1),
        })
    }

    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    async fn rpc_call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, LedgerError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": self.request_id.fetch_add(1, Ordering::Relaxed),
        });

        let resp: JsonRpcResponse<T> = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if let Some(err) = resp.error {
            return Err(LedgerError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        resp.result
            .ok_or_else(|| LedgerError::EmptyResult(method.to_string()))
    }

    async fn quantity(&self, method: &str, params: serde_json::Value) -> Result<u128, LedgerError> {
        let value: String = self.rpc_call(method, params).await?;
        parse_quantity(&value).ok_or_else(|| LedgerError::InvalidQuantity {
            method: method.to_string(),
            value,
        })
    }

    /// Build and sign the record transaction, returning its raw 2718 encoding.
    async fn signed_transaction(
        &self,
        nonce: u64,
        gas_price: u128,
        payload: &[u8],
    ) -> Result<Vec<u8>, LedgerError> {
        let tx = TxLegacy {
            chain_id: self.chain_id,
            nonce,
            gas_price,
            gas_limit: GAS_LIMIT,
            to: TxKind::Call(NULL_DESTINATION),
            value: U256::ZERO,
            input: Bytes::copy_from_slice(payload),
        };

        let sig = self
            .signer
            .sign_hash(&tx.signature_hash())
            .await
            .map_err(|e| LedgerError::Signing(e.to_string()))?;

        let signed = TxEnvelope::Legacy(tx.into_signed(sig));
        Ok(signed.encoded_2718())
    }
}

#[async_trait]
impl LedgerWriter for BlockchainWriter {
    fn address(&self) -> String {
        self.signer.address().to_string()
    }

    async fn submit(&self, payload: &[u8]) -> Result<TransactionId, LedgerError> {
        let address = self.address();

        let nonce = self
            .quantity(
                "eth_getTransactionCount",
                serde_json::json!([address, "latest"]),
            )
            .await?;
        let nonce = u64::try_from(nonce).map_err(|_| LedgerError::InvalidQuantity {
            method: "eth_getTransactionCount".to_string(),
            value: nonce.to_string(),
        })?;

        let gas_price = self.quantity("eth_gasPrice", serde_json::json!([])).await?;

        debug!(
            "Signing {} byte payload from {} (nonce {}, gas price {})",
            payload.len(),
            address,
            nonce,
            gas_price
        );

        let raw_tx = self.signed_transaction(nonce, gas_price, payload).await?;
        let raw_hex = format!("0x{}", hex::encode(&raw_tx));

        let tx_hash: String = self
            .rpc_call("eth_sendRawTransaction", serde_json::json!([raw_hex]))
            .await?;

        info!("Submitted ledger transaction {}", tx_hash);
        Ok(TransactionId::new(tx_hash))
    }
}

/// Parse a JSON-RPC hex quantity such as `0x1a`.
fn parse_quantity(value: &str) -> Option<u128> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    if digits.is_empty() {
        return None;
    }
    u128::from_str_radix(digits, 16).ok()
}
