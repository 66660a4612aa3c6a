use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, tx::Transaction, Amount, Hash};

/// How a block is addressed in a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockId {
    Hash(Hash),
    Height(u64),
}

impl From<Hash> for BlockId {
    fn from(hash: Hash) -> Self {
        BlockId::Hash(hash)
    }
}

impl From<u64> for BlockId {
    fn from(height: u64) -> Self {
        BlockId::Height(height)
    }
}

impl FromStr for BlockId {
    type Err = ValidationError;

    /// Accepts a 64-character hex hash or a decimal height.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 64 && !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse::<u64>()
                .map(BlockId::Height)
                .map_err(|_| ValidationError::InvalidBlockId(s.to_string()));
        }
        s.parse::<Hash>()
            .map(BlockId::Hash)
            .map_err(|_| ValidationError::InvalidBlockId(s.to_string()))
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Hash(hash) => write!(f, "{}", hash),
            BlockId::Height(height) => write!(f, "{}", height),
        }
    }
}

/// Block header fields as reported by the daemon
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub hash: Hash,
    pub height: u64,
    pub timestamp: DateTime<Utc>,
    /// Coinbase reward, including fees
    pub reward: Amount,
    pub difficulty: u64,
    pub nonce: u32,
    pub orphan: bool,
    pub prev_hash: Hash,
    pub major_version: u8,
    pub minor_version: u8,
}

/// A block and the transactions it carries, excluding the miner transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    header: BlockHeader,
    tx_hashes: Vec<Hash>,
    transactions: Vec<Transaction>,
}

impl Block {
    /// `tx_hashes` keeps the block's own ordering; `transactions` holds
    /// whatever of those the daemon could resolve.
    pub fn new(header: BlockHeader, tx_hashes: Vec<Hash>, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            tx_hashes,
            transactions,
        }
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn hash(&self) -> &Hash {
        &self.header.hash
    }

    pub fn height(&self) -> u64 {
        self.header.height
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.header.timestamp
    }

    pub fn reward(&self) -> Amount {
        self.header.reward
    }

    pub fn transaction_hashes(&self) -> &[Hash] {
        &self.tx_hashes
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Whether `hash` is this block's hash or one of its transactions.
    pub fn contains_hash(&self, hash: &Hash) -> bool {
        self.header.hash == *hash || self.tx_hashes.contains(hash)
    }

    /// String form of [`Block::contains_hash`]. A string that is not a
    /// 64-character hex hash is an error, not a miss.
    pub fn contains(&self, hash: &str) -> Result<bool, ValidationError> {
        let hash: Hash = hash.parse()?;
        Ok(self.contains_hash(&hash))
    }

    pub fn contains_transaction(&self, tx: &Transaction) -> bool {
        self.contains_hash(tx.hash())
    }
}
