use std::sync::Arc;

use rpc_core::{DaemonBackend, JsonRpcDaemon, NetworkInfo, RpcError, TransportConfig};
use tokio::sync::OnceCell;
use tracing::{info, warn};
use xmr_core::{Block, BlockId, Hash, MempoolEntry, NetworkType, SubmissionResult, Transaction};

use crate::Result;

/// Handle to one daemon.
///
/// The network is resolved by the first successful call that reports it,
/// whether that was [`Daemon::net`] itself or [`Daemon::info`] /
/// [`Daemon::height`], and is never fetched again. Everything else goes to
/// the daemon on every call.
pub struct Daemon {
    backend: Arc<dyn DaemonBackend>,
    network: OnceCell<NetworkType>,
}

impl Daemon {
    pub fn new(backend: Arc<dyn DaemonBackend>) -> Self {
        Self {
            backend,
            network: OnceCell::new(),
        }
    }

    /// JSON-RPC daemon over HTTP
    pub fn connect(config: &TransportConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(JsonRpcDaemon::connect(config)?)))
    }

    pub async fn info(&self) -> Result<NetworkInfo> {
        let info = self.backend.info().await?;
        self.remember_network(info.network);
        Ok(info)
    }

    /// The daemon's network. Once known it is served from the handle.
    ///
    /// Callers racing on the first resolution may each query the daemon;
    /// whichever answer is stored first is what all of them get back.
    pub async fn net(&self) -> Result<NetworkType> {
        if let Some(network) = self.network.get() {
            return Ok(*network);
        }
        let reported = self.info().await?.network;
        Ok(self.network.get().copied().unwrap_or(reported))
    }

    /// The network if some earlier call already resolved it
    pub fn cached_net(&self) -> Option<NetworkType> {
        self.network.get().copied()
    }

    /// Number of blocks in the chain
    pub async fn height(&self) -> Result<u64> {
        Ok(self.info().await?.height)
    }

    pub async fn block(&self, id: BlockId) -> Result<Block> {
        self.backend.block(id).await
    }

    /// Looks a block up by hash or decimal height.
    pub async fn block_by_id(&self, id: &str) -> Result<Block> {
        let id: BlockId = id.parse()?;
        self.block(id).await
    }

    pub async fn block_by_hash(&self, hash: &str) -> Result<Block> {
        let hash: Hash = hash.parse()?;
        self.block(BlockId::Hash(hash)).await
    }

    pub async fn block_by_height(&self, height: u64) -> Result<Block> {
        self.block(BlockId::Height(height)).await
    }

    /// Transactions the daemon knows among `hashes`, in the order given.
    ///
    /// Every hash is validated before anything is sent.
    pub async fn transactions<S: AsRef<str>>(&self, hashes: &[S]) -> Result<Vec<Transaction>> {
        let hashes = hashes
            .iter()
            .map(|hash| hash.as_ref().parse::<Hash>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.backend.transactions(&hashes).await
    }

    /// A single transaction that must exist
    pub async fn transaction(&self, hash: &str) -> Result<Transaction> {
        self.transactions(&[hash])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RpcError::NotFound(format!("transaction {}", hash)))
    }

    pub async fn mempool(&self) -> Result<Vec<MempoolEntry>> {
        self.backend.mempool().await
    }

    /// Submits and relays a serialized transaction. Check
    /// [`SubmissionResult::is_accepted`]: a rejection is not an error.
    pub async fn send_transaction(&self, blob: &[u8]) -> Result<SubmissionResult> {
        self.send_transaction_with(blob, true).await
    }

    pub async fn send_transaction_with(&self, blob: &[u8], relay: bool) -> Result<SubmissionResult> {
        self.backend.send_transaction(blob, relay).await
    }

    fn remember_network(&self, network: NetworkType) {
        match self.network.set(network) {
            Ok(()) => info!(%network, "daemon network resolved"),
            Err(_) => match self.network.get() {
                Some(known) if *known != network => {
                    warn!(%known, reported = %network, "daemon reports a different network, keeping the first one");
                }
                _ => {}
            },
        }
    }
}
