//! Long-lived handles for a Monero daemon and wallet.
//!
//! [`Daemon`] and [`Wallet`] sit in front of an RPC backend and are what
//! applications hold on to. Chain and wallet state is fetched fresh on every
//! call; only the daemon's network, which cannot change while connected, is
//! remembered.

pub mod config;
pub mod daemon;
pub mod wallet;

pub use config::{ClientConfig, ConfigError};
pub use daemon::Daemon;
pub use wallet::{Wallet, WalletAccount};

pub use rpc_core::{NetworkInfo, RpcError as Error, TransportConfig};
pub use xmr_core::*;

pub type Result<T> = std::result::Result<T, Error>;
