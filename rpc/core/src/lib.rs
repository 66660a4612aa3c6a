//! JSON-RPC layer for `monerod` and `monero-wallet-rpc`.
//!
//! [`Transport`] moves JSON to and from the remote service; the
//! [`DaemonBackend`] and [`WalletBackend`] implementations turn those payloads
//! into `xmr_core` entities.

pub mod api;
pub mod daemon;
pub mod http;
pub mod mock;
pub mod model;
pub mod transport;
pub mod wallet;

pub use api::{DaemonBackend, WalletBackend};
pub use daemon::JsonRpcDaemon;
pub use http::HttpTransport;
pub use mock::MockTransport;
pub use model::*;
pub use transport::{Transport, TransportConfig};
pub use wallet::JsonRpcWallet;
