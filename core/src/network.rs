use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// The Monero network a daemon or wallet is operating on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Main network
    Mainnet,
    /// Test network
    Testnet,
    /// Staging network
    Stagenet,
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::Mainnet => write!(f, "mainnet"),
            NetworkType::Testnet => write!(f, "testnet"),
            NetworkType::Stagenet => write!(f, "stagenet"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(NetworkType::Mainnet),
            "testnet" => Ok(NetworkType::Testnet),
            "stagenet" => Ok(NetworkType::Stagenet),
            other => Err(ValidationError::UnknownNetwork(other.to_string())),
        }
    }
}

impl NetworkType {
    /// Returns an iterator over all NetworkType variants
    pub fn iter() -> impl Iterator<Item = NetworkType> {
        [
            NetworkType::Mainnet,
            NetworkType::Testnet,
            NetworkType::Stagenet,
        ]
        .into_iter()
    }

    /// Default `monerod` RPC port
    pub fn daemon_rpc_port(&self) -> u16 {
        match self {
            NetworkType::Mainnet => 18081,
            NetworkType::Testnet => 28081,
            NetworkType::Stagenet => 38081,
        }
    }

    /// Conventional `monero-wallet-rpc` port, one above the daemon's
    pub fn wallet_rpc_port(&self) -> u16 {
        self.daemon_rpc_port() + 1
    }
}
