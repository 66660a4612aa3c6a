//! `monerod` backend over [`Transport`]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::{debug, warn};
use xmr_core::{
    Amount, Block, BlockHeader, BlockId, Hash, MempoolEntry, NetworkType, SubmissionFlag,
    SubmissionResult, Transaction,
};

use crate::api::DaemonBackend;
use crate::http::HttpTransport;
use crate::model::*;
use crate::transport::{Transport, TransportConfig};

/// `get_block` error codes meaning "no such block"
const TOO_BIG_HEIGHT: i64 = -2;
const UNKNOWN_BLOCK: i64 = -5;

pub struct JsonRpcDaemon {
    transport: Arc<dyn Transport>,
}

impl JsonRpcDaemon {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// HTTP transport to the daemon described by `config`
    pub fn connect(config: &TransportConfig) -> Result<Self, RpcError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    async fn call_endpoint<T: serde::de::DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, RpcError> {
        let response = self.transport.endpoint(path, body).await?;
        check_status(path, &response)?;
        Ok(serde_json::from_value(response)?)
    }

    /// Height of the newest block, read fresh from the daemon.
    async fn top_height(&self) -> Result<u64, RpcError> {
        let raw: RawHeight = self.call_endpoint("get_height", json!({})).await?;
        Ok(raw.height.saturating_sub(1))
    }
}

#[async_trait]
impl DaemonBackend for JsonRpcDaemon {
    async fn info(&self) -> Result<NetworkInfo, RpcError> {
        let raw: RawInfo = serde_json::from_value(self.transport.json_rpc("get_info", json!({})).await?)?;
        let network = network_of(&raw)?;
        Ok(NetworkInfo {
            height: raw.height,
            target_height: raw.target_height,
            difficulty: raw.difficulty,
            tx_count: raw.tx_count,
            tx_pool_size: raw.tx_pool_size,
            status: raw.status,
            network,
        })
    }

    async fn height(&self) -> Result<u64, RpcError> {
        let raw: RawHeight = self.call_endpoint("get_height", json!({})).await?;
        Ok(raw.height)
    }

    async fn block(&self, id: BlockId) -> Result<Block, RpcError> {
        let params = match id {
            BlockId::Hash(hash) => json!({ "hash": hash.to_hex() }),
            BlockId::Height(height) => json!({ "height": height }),
        };
        let raw: RawBlock = match self.transport.json_rpc("get_block", params).await {
            Ok(result) => serde_json::from_value(result)?,
            Err(RpcError::Rpc { code, message }) if code == TOO_BIG_HEIGHT || code == UNKNOWN_BLOCK => {
                return Err(RpcError::NotFound(format!("block {}: {}", id, message)));
            }
            Err(e) => return Err(e),
        };

        let header = parse_header(raw.block_header)?;
        let tx_hashes = raw
            .tx_hashes
            .iter()
            .map(|hash| parse_hash(hash))
            .collect::<Result<Vec<_>, _>>()?;
        let transactions = if tx_hashes.is_empty() {
            Vec::new()
        } else {
            self.transactions(&tx_hashes).await?
        };
        debug!(height = header.height, txs = tx_hashes.len(), "block assembled");
        Ok(Block::new(header, tx_hashes, transactions))
    }

    async fn transactions(&self, hashes: &[Hash]) -> Result<Vec<Transaction>, RpcError> {
        if hashes.is_empty() {
            return Ok(Vec::new());
        }
        let body = json!({
            "txs_hashes": hashes.iter().map(Hash::to_hex).collect::<Vec<_>>(),
            "decode_as_json": true,
        });
        let raw: RawTransactions = self.call_endpoint("get_transactions", body).await?;
        if !raw.missed_tx.is_empty() {
            warn!(missed = raw.missed_tx.len(), "daemon does not know some requested transactions");
        }

        let mut found = HashMap::with_capacity(raw.txs.len());
        for tx in raw.txs {
            found.insert(parse_hash(&tx.tx_hash)?, tx);
        }
        let top_height = if found.values().any(|tx| !tx.in_pool) {
            Some(self.top_height().await?)
        } else {
            None
        };

        // Walk the request, not the response, so results keep the caller's order.
        let mut transactions = Vec::with_capacity(found.len());
        for hash in hashes {
            if let Some(raw) = found.remove(hash) {
                transactions.push(build_transaction(*hash, raw, top_height)?);
            }
        }
        Ok(transactions)
    }

    async fn mempool(&self) -> Result<Vec<MempoolEntry>, RpcError> {
        let raw: RawPool = self.call_endpoint("get_transaction_pool", json!({})).await?;
        raw.transactions
            .into_iter()
            .map(|entry| {
                Ok(MempoolEntry::new(
                    parse_hash(&entry.id_hash)?,
                    entry.blob_size,
                    Amount::from_atomic(entry.fee),
                    parse_timestamp(entry.receive_time)?,
                    entry.relayed,
                    entry.double_spend_seen,
                ))
            })
            .collect()
    }

    async fn send_transaction(&self, blob: &[u8], relay: bool) -> Result<SubmissionResult, RpcError> {
        let body = json!({
            "tx_as_hex": hex::encode(blob),
            "do_not_relay": !relay,
        });
        let raw: RawSubmission = serde_json::from_value(self.transport.endpoint("send_raw_transaction", body).await?)?;
        let result = submission_result(raw);
        if result.is_accepted() {
            debug!(bytes = blob.len(), "transaction accepted");
        } else {
            warn!(status = %result.status, reasons = ?result.rejection_reasons(), "transaction rejected");
        }
        Ok(result)
    }
}

fn check_status(path: &str, response: &Value) -> Result<(), RpcError> {
    match response.get("status").and_then(Value::as_str) {
        None | Some("OK") => Ok(()),
        Some(status) => Err(RpcError::Status {
            path: path.to_string(),
            status: status.to_string(),
        }),
    }
}

fn network_of(raw: &RawInfo) -> Result<NetworkType, RpcError> {
    if let Some(nettype) = raw.nettype.as_deref() {
        return nettype
            .parse()
            .map_err(|_| RpcError::Malformed(format!("unsupported nettype {}", nettype)));
    }
    match (raw.mainnet, raw.testnet, raw.stagenet) {
        (true, false, false) => Ok(NetworkType::Mainnet),
        (false, true, false) => Ok(NetworkType::Testnet),
        (false, false, true) => Ok(NetworkType::Stagenet),
        _ => Err(RpcError::Malformed("get_info does not identify the network".to_string())),
    }
}

pub(crate) fn parse_hash(s: &str) -> Result<Hash, RpcError> {
    s.parse()
        .map_err(|_| RpcError::Malformed(format!("invalid hash {:?} in response", s)))
}

pub(crate) fn parse_timestamp(secs: i64) -> Result<DateTime<Utc>, RpcError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| RpcError::Malformed(format!("timestamp {} out of range", secs)))
}

fn parse_header(raw: RawBlockHeader) -> Result<BlockHeader, RpcError> {
    Ok(BlockHeader {
        hash: parse_hash(&raw.hash)?,
        height: raw.height,
        timestamp: parse_timestamp(raw.timestamp)?,
        reward: Amount::from_atomic(raw.reward),
        difficulty: raw.difficulty,
        nonce: raw.nonce,
        orphan: raw.orphan_status,
        prev_hash: parse_hash(&raw.prev_hash)?,
        major_version: raw.major_version,
        minor_version: raw.minor_version,
    })
}

fn build_transaction(hash: Hash, raw: RawTransaction, top_height: Option<u64>) -> Result<Transaction, RpcError> {
    let size = raw.as_hex.len() / 2;
    let fee = transaction_fee(&raw.as_json)?;
    match (raw.in_pool, top_height) {
        (false, Some(top_height)) => Ok(Transaction::confirmed(
            hash,
            raw.block_height,
            top_height,
            size,
            fee,
            Some(parse_timestamp(raw.block_timestamp)?),
        )),
        _ => Ok(Transaction::pending(hash, size, fee, None)),
    }
}

/// Fee from the decoded transaction: the RingCT fee field when present,
/// inputs minus outputs for version 1, nothing for coinbase.
fn transaction_fee(as_json: &str) -> Result<Amount, RpcError> {
    if as_json.is_empty() {
        return Err(RpcError::Malformed("transaction without as_json".to_string()));
    }
    let doc: Value = serde_json::from_str(as_json)?;
    let inputs = doc.get("vin").and_then(Value::as_array).cloned().unwrap_or_default();

    if inputs.iter().any(|input| input.get("gen").is_some()) {
        return Ok(Amount::ZERO);
    }
    if let Some(fee) = doc.pointer("/rct_signatures/txnFee").and_then(Value::as_u64) {
        return Ok(Amount::from_atomic(fee));
    }

    let spent = checked_total(inputs.iter().map(|input| input.pointer("/key/amount")));
    let outputs = doc.get("vout").and_then(Value::as_array).cloned().unwrap_or_default();
    let received = checked_total(outputs.iter().map(|output| output.get("amount")));
    match (spent, received) {
        (Some(spent), Some(received)) if spent >= received => Ok(Amount::from_atomic(spent - received)),
        _ => Err(RpcError::Malformed("cannot derive fee from transaction".to_string())),
    }
}

fn checked_total<'a>(values: impl Iterator<Item = Option<&'a Value>>) -> Option<u64> {
    values.fold(Some(0u64), |total, value| total?.checked_add(value?.as_u64()?))
}

fn submission_result(raw: RawSubmission) -> SubmissionResult {
    let flags = [
        (raw.double_spend, SubmissionFlag::DoubleSpend),
        (raw.fee_too_low, SubmissionFlag::FeeTooLow),
        (raw.invalid_input, SubmissionFlag::InvalidInput),
        (raw.invalid_output, SubmissionFlag::InvalidOutput),
        (raw.low_mixin, SubmissionFlag::LowMixin),
        (raw.not_relayed, SubmissionFlag::NotRelayed),
        (raw.overspend, SubmissionFlag::Overspend),
        (raw.too_big, SubmissionFlag::TooBig),
        (raw.too_few_outputs, SubmissionFlag::TooFewOutputs),
        (raw.sanity_check_failed, SubmissionFlag::SanityCheckFailed),
        (raw.tx_extra_too_big, SubmissionFlag::TxExtraTooBig),
        (raw.nonzero_unlock_time, SubmissionFlag::NonzeroUnlockTime),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect();

    SubmissionResult {
        status: raw.status,
        reason: Some(raw.reason).filter(|reason| !reason.is_empty()),
        flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ringct_fee_is_read_directly() {
        let doc = json!({ "version": 2, "vin": [{ "key": { "amount": 0 } }], "rct_signatures": { "type": 5, "txnFee": 331130000u64 } });
        assert_eq!(transaction_fee(&doc.to_string()).unwrap(), Amount::from_atomic(331_130_000));
    }

    #[test]
    fn v1_fee_is_inputs_minus_outputs() {
        let doc = json!({
            "version": 1,
            "vin": [{ "key": { "amount": 5000 } }, { "key": { "amount": 3000 } }],
            "vout": [{ "amount": 6000 }, { "amount": 1500 }]
        });
        assert_eq!(transaction_fee(&doc.to_string()).unwrap(), Amount::from_atomic(500));
    }

    #[test]
    fn coinbase_has_no_fee() {
        let doc = json!({ "version": 2, "vin": [{ "gen": { "height": 451992 } }], "rct_signatures": { "type": 0 } });
        assert_eq!(transaction_fee(&doc.to_string()).unwrap(), Amount::ZERO);
    }

    #[test]
    fn outputs_above_inputs_are_malformed() {
        let doc = json!({ "version": 1, "vin": [{ "key": { "amount": 1 } }], "vout": [{ "amount": 2 }] });
        assert!(matches!(transaction_fee(&doc.to_string()), Err(RpcError::Malformed(_))));
    }

    #[test]
    fn network_prefers_nettype_then_flags() {
        let raw: RawInfo = serde_json::from_value(json!({ "height": 1, "nettype": "testnet", "mainnet": true })).unwrap();
        assert_eq!(network_of(&raw).unwrap(), NetworkType::Testnet);
        let raw: RawInfo = serde_json::from_value(json!({ "height": 1, "stagenet": true })).unwrap();
        assert_eq!(network_of(&raw).unwrap(), NetworkType::Stagenet);
        let raw: RawInfo = serde_json::from_value(json!({ "height": 1 })).unwrap();
        assert!(network_of(&raw).is_err());
    }

    #[test]
    fn empty_reason_is_dropped() {
        let raw = RawSubmission {
            status: "OK".to_string(),
            ..RawSubmission::default()
        };
        let result = submission_result(raw);
        assert!(result.is_accepted());
        assert_eq!(result.reason, None);
        assert!(result.flags.is_empty());
    }
}
