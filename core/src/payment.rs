use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Address, Amount, Hash};

/// Short (8-byte) or long (32-byte) payment id in hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaymentId(String);

impl PaymentId {
    /// Parses a payment id, mapping the all-zero placeholder the wallet uses
    /// for "none" to `None`.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, ValidationError> {
        if s.is_empty() || s.bytes().all(|b| b == b'0') {
            return Ok(None);
        }
        s.parse().map(Some)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_short(&self) -> bool {
        self.0.len() == 16
    }
}

impl FromStr for PaymentId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed =
            matches!(s.len(), 16 | 64) && s.bytes().all(|b| b.is_ascii_hexdigit());
        if !well_formed {
            return Err(ValidationError::InvalidPaymentId(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for PaymentId {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PaymentId> for String {
    fn from(id: PaymentId) -> Self {
        id.0
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentDirection {
    Incoming,
    Outgoing,
}

/// One recipient of an outgoing transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub address: Address,
    pub amount: Amount,
}

/// A transfer into or out of a wallet account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub direction: PaymentDirection,
    pub tx_hash: Hash,
    pub timestamp: DateTime<Utc>,
    pub amount: Amount,
    /// Zero for incoming payments, whose fee the sender paid
    pub fee: Amount,
    pub payment_id: Option<PaymentId>,
    /// `None` until the transaction is mined
    pub height: Option<u64>,
    pub account_index: u32,
    pub subaddress_index: u32,
    /// Receiving subaddress of an incoming payment
    pub local_address: Option<Address>,
    pub destinations: Vec<Destination>,
    pub note: String,
}

impl Payment {
    pub fn is_confirmed(&self) -> bool {
        self.height.is_some()
    }
}
