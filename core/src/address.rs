use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

const STANDARD_LEN: usize = 95;
const INTEGRATED_LEN: usize = 106;
const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// A wallet address as reported by the wallet RPC.
///
/// Only the textual shape is checked (length and base58 alphabet); key and
/// checksum validation is left to the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for 106-character addresses that embed a payment id.
    pub fn is_integrated(&self) -> bool {
        self.0.len() == INTEGRATED_LEN
    }
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = matches!(s.len(), STANDARD_LEN | INTEGRATED_LEN)
            && s.bytes().all(|b| BASE58_ALPHABET.contains(&b));
        if !well_formed {
            return Err(ValidationError::InvalidAddress(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for Address {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
