//! Domain model shared by the Monero daemon and wallet clients.
//!
//! Everything in this crate is a plain value: entities are built once from an
//! RPC response and never patched afterwards. Monetary values go through
//! [`Amount`], which keeps the exact piconero count and never touches floats.

pub mod account;
pub mod address;
pub mod amount;
pub mod block;
pub mod errors;
pub mod hash;
pub mod network;
pub mod payment;
pub mod tx;

pub use account::{Account, Balances};
pub use address::Address;
pub use amount::{Amount, DECIMAL_PLACES, PICONERO_PER_XMR};
pub use block::{Block, BlockHeader, BlockId};
pub use errors::ValidationError;
pub use hash::{Hash, HASH_SIZE};
pub use network::NetworkType;
pub use payment::{Destination, Payment, PaymentDirection, PaymentId};
pub use tx::{confirmations, MempoolEntry, SubmissionFlag, SubmissionResult, Transaction};
