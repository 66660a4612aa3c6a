//! RPC error type, daemon info snapshot and the raw response shapes.
//!
//! The `Raw*` structs mirror what `monerod` and `monero-wallet-rpc` put on the
//! wire. They stay private to the backends' parsing; callers only ever see the
//! `xmr_core` entities built from them.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xmr_core::{NetworkType, ValidationError};

/// RPC error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    /// Connection, timeout, HTTP status or undecodable body
    #[error("Network error: {0}")]
    Network(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// A plain endpoint answered with something other than `OK`
    #[error("{path} returned status {status}")]
    Status { path: String, status: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Well-formed JSON in an unexpected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        RpcError::Malformed(err.to_string())
    }
}

/// Chain state returned by `get_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// Number of blocks in the chain; the top block is at `height - 1`
    pub height: u64,
    pub target_height: u64,
    pub difficulty: u64,
    pub tx_count: u64,
    pub tx_pool_size: u64,
    pub status: String,
    pub network: NetworkType,
}

impl NetworkInfo {
    /// Height of the most recent block
    pub fn top_height(&self) -> u64 {
        self.height.saturating_sub(1)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawInfo {
    pub height: u64,
    #[serde(default)]
    pub target_height: u64,
    #[serde(default)]
    pub difficulty: u64,
    #[serde(default)]
    pub tx_count: u64,
    #[serde(default)]
    pub tx_pool_size: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub nettype: Option<String>,
    #[serde(default)]
    pub mainnet: bool,
    #[serde(default)]
    pub testnet: bool,
    #[serde(default)]
    pub stagenet: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawHeight {
    pub height: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawBlock {
    pub block_header: RawBlockHeader,
    #[serde(default)]
    pub tx_hashes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawBlockHeader {
    pub hash: String,
    pub height: u64,
    pub timestamp: i64,
    pub reward: u64,
    #[serde(default)]
    pub difficulty: u64,
    #[serde(default)]
    pub nonce: u32,
    #[serde(default)]
    pub orphan_status: bool,
    pub prev_hash: String,
    #[serde(default)]
    pub major_version: u8,
    #[serde(default)]
    pub minor_version: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawTransactions {
    #[serde(default)]
    pub txs: Vec<RawTransaction>,
    #[serde(default)]
    pub missed_tx: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawTransaction {
    pub tx_hash: String,
    #[serde(default)]
    pub as_hex: String,
    /// JSON document encoded as a string
    #[serde(default)]
    pub as_json: String,
    #[serde(default)]
    pub block_height: u64,
    #[serde(default)]
    pub block_timestamp: i64,
    #[serde(default)]
    pub in_pool: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawPool {
    #[serde(default)]
    pub transactions: Vec<RawPoolEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawPoolEntry {
    pub id_hash: String,
    pub blob_size: usize,
    pub fee: u64,
    pub receive_time: i64,
    #[serde(default)]
    pub relayed: bool,
    #[serde(default)]
    pub double_spend_seen: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawSubmission {
    pub status: String,
    pub reason: String,
    pub double_spend: bool,
    pub fee_too_low: bool,
    pub invalid_input: bool,
    pub invalid_output: bool,
    pub low_mixin: bool,
    pub not_relayed: bool,
    pub overspend: bool,
    pub too_big: bool,
    pub too_few_outputs: bool,
    pub sanity_check_failed: bool,
    pub tx_extra_too_big: bool,
    pub nonzero_unlock_time: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawAddresses {
    pub address: String,
    #[serde(default)]
    pub addresses: Vec<RawAddressEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawAddressEntry {
    pub address: String,
    #[serde(default)]
    pub address_index: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawBalance {
    pub balance: u64,
    pub unlocked_balance: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawAccounts {
    #[serde(default)]
    pub subaddress_accounts: Vec<RawAccount>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawAccount {
    pub account_index: u32,
    pub balance: u64,
    pub unlocked_balance: u64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub tag: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawTransfers {
    #[serde(rename = "in", default)]
    pub incoming: Vec<RawTransfer>,
    #[serde(default)]
    pub out: Vec<RawTransfer>,
    #[serde(default)]
    pub pending: Vec<RawTransfer>,
    #[serde(default)]
    pub pool: Vec<RawTransfer>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawTransfer {
    pub txid: String,
    #[serde(default)]
    pub payment_id: String,
    #[serde(default)]
    pub height: u64,
    pub timestamp: i64,
    pub amount: u64,
    #[serde(default)]
    pub fee: u64,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub subaddr_index: RawSubaddrIndex,
    #[serde(default)]
    pub destinations: Vec<RawDestination>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub(crate) struct RawSubaddrIndex {
    pub minor: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawDestination {
    pub address: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawWalletHeight {
    pub height: u64,
}
