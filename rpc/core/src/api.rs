//! Backend traits the facades are written against

use async_trait::async_trait;
use xmr_core::{Account, Address, Amount, Balances, Block, BlockId, Hash, MempoolEntry, Payment, SubmissionResult, Transaction};

use crate::model::*;

/// Daemon queries, one fresh round trip (or two) per call
#[async_trait]
pub trait DaemonBackend: Send + Sync {
    // Chain state
    async fn info(&self) -> Result<NetworkInfo, RpcError>;
    async fn height(&self) -> Result<u64, RpcError>;

    // Blocks and transactions
    async fn block(&self, id: BlockId) -> Result<Block, RpcError>;
    /// Transactions the daemon knows, in input order; unknown hashes are skipped.
    async fn transactions(&self, hashes: &[Hash]) -> Result<Vec<Transaction>, RpcError>;
    async fn mempool(&self) -> Result<Vec<MempoolEntry>, RpcError>;

    /// Submits a serialized transaction. A rejection is an `Ok` result.
    async fn send_transaction(&self, blob: &[u8], relay: bool) -> Result<SubmissionResult, RpcError>;
}

/// Wallet queries; `None` for an account index means the primary account
#[async_trait]
pub trait WalletBackend: Send + Sync {
    async fn height(&self) -> Result<u64, RpcError>;
    async fn address(&self, account: Option<u32>) -> Result<Address, RpcError>;
    /// Every subaddress of the account, by subaddress index
    async fn addresses(&self, account: Option<u32>) -> Result<Vec<Address>, RpcError>;
    async fn balances(&self, account: Option<u32>) -> Result<Balances, RpcError>;

    /// One figure out of [`WalletBackend::balances`], still a single call.
    async fn balance(&self, account: Option<u32>, unlocked: bool) -> Result<Amount, RpcError> {
        Ok(self.balances(account).await?.select(unlocked))
    }

    async fn accounts(&self) -> Result<Vec<Account>, RpcError>;
    async fn payments_in(&self, account: Option<u32>) -> Result<Vec<Payment>, RpcError>;
    async fn payments_out(&self, account: Option<u32>) -> Result<Vec<Payment>, RpcError>;
}
