use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Amount, Hash};

/// Number of blocks from the one containing `tx_height` up to and including
/// `top_height`. Unconfirmed transactions have none.
pub fn confirmations(tx_height: Option<u64>, top_height: u64) -> u64 {
    match tx_height {
        Some(height) if height <= top_height => top_height - height + 1,
        _ => 0,
    }
}

/// A transaction snapshot, confirmed or still in the pool.
///
/// `height` is `None` while the transaction waits in the mempool. The
/// confirmation count is derived at construction from the chain's top height
/// and never transmitted by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    hash: Hash,
    height: Option<u64>,
    timestamp: Option<DateTime<Utc>>,
    size: usize,
    fee: Amount,
    confirmations: u64,
}

impl Transaction {
    /// A transaction mined at `height`, seen from a chain whose top block is `top_height`.
    pub fn confirmed(
        hash: Hash,
        height: u64,
        top_height: u64,
        size: usize,
        fee: Amount,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            hash,
            height: Some(height),
            timestamp,
            size,
            fee,
            confirmations: confirmations(Some(height), top_height),
        }
    }

    /// A transaction that is not in any block yet.
    pub fn pending(hash: Hash, size: usize, fee: Amount, timestamp: Option<DateTime<Utc>>) -> Self {
        Self {
            hash,
            height: None,
            timestamp,
            size,
            fee,
            confirmations: 0,
        }
    }

    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    pub fn height(&self) -> Option<u64> {
        self.height
    }

    /// Block time for confirmed transactions, receive time for pool entries
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Serialized size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn fee(&self) -> Amount {
        self.fee
    }

    pub fn confirmations(&self) -> u64 {
        self.confirmations
    }

    pub fn is_confirmed(&self) -> bool {
        self.height.is_some()
    }
}

/// A transaction as listed by the daemon's pool.
///
/// Built only through [`MempoolEntry::new`], which goes through
/// [`Transaction::pending`], so height is always `None` and confirmations 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MempoolEntry {
    tx: Transaction,
    received: DateTime<Utc>,
    relayed: bool,
    double_spend_seen: bool,
}

impl MempoolEntry {
    pub fn new(
        hash: Hash,
        size: usize,
        fee: Amount,
        received: DateTime<Utc>,
        relayed: bool,
        double_spend_seen: bool,
    ) -> Self {
        Self {
            tx: Transaction::pending(hash, size, fee, Some(received)),
            received,
            relayed,
            double_spend_seen,
        }
    }

    pub fn received(&self) -> DateTime<Utc> {
        self.received
    }

    pub fn relayed(&self) -> bool {
        self.relayed
    }

    pub fn double_spend_seen(&self) -> bool {
        self.double_spend_seen
    }

    pub fn into_transaction(self) -> Transaction {
        self.tx
    }
}

impl Deref for MempoolEntry {
    type Target = Transaction;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

/// Reject indicators the daemon attaches to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionFlag {
    DoubleSpend,
    FeeTooLow,
    InvalidInput,
    InvalidOutput,
    LowMixin,
    NotRelayed,
    Overspend,
    TooBig,
    TooFewOutputs,
    SanityCheckFailed,
    TxExtraTooBig,
    NonzeroUnlockTime,
}

impl SubmissionFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionFlag::DoubleSpend => "double_spend",
            SubmissionFlag::FeeTooLow => "fee_too_low",
            SubmissionFlag::InvalidInput => "invalid_input",
            SubmissionFlag::InvalidOutput => "invalid_output",
            SubmissionFlag::LowMixin => "low_mixin",
            SubmissionFlag::NotRelayed => "not_relayed",
            SubmissionFlag::Overspend => "overspend",
            SubmissionFlag::TooBig => "too_big",
            SubmissionFlag::TooFewOutputs => "too_few_outputs",
            SubmissionFlag::SanityCheckFailed => "sanity_check_failed",
            SubmissionFlag::TxExtraTooBig => "tx_extra_too_big",
            SubmissionFlag::NonzeroUnlockTime => "nonzero_unlock_time",
        }
    }
}

/// Outcome of a raw transaction submission, passed through as the daemon
/// reported it. A rejection is a value here, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub status: String,
    pub reason: Option<String>,
    pub flags: Vec<SubmissionFlag>,
}

impl SubmissionResult {
    pub fn is_accepted(&self) -> bool {
        self.status == "OK"
    }

    /// Flags explaining a rejection; `not_relayed` alone is not a rejection.
    pub fn rejection_reasons(&self) -> Vec<&'static str> {
        self.flags
            .iter()
            .filter(|flag| **flag != SubmissionFlag::NotRelayed)
            .map(SubmissionFlag::as_str)
            .collect()
    }
}
