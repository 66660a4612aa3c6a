use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use rpc_core::TransportConfig;
use xmr_core::NetworkType;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Where the daemon and wallet RPC servers live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub daemon: TransportConfig,
    pub wallet: TransportConfig,
}

impl ClientConfig {
    /// Load configuration from file if it exists, otherwise use defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Local servers on the default ports of `network`
    pub fn for_network(network: NetworkType) -> Self {
        Self {
            daemon: TransportConfig::new("127.0.0.1", network.daemon_rpc_port()),
            wallet: TransportConfig::new("127.0.0.1", network.wallet_rpc_port()),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_network(NetworkType::Mainnet)
    }
}
