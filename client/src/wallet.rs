use std::sync::Arc;

use rpc_core::{JsonRpcWallet, TransportConfig, WalletBackend};
use xmr_core::{Account, Address, Amount, Balances, Payment};

use crate::Result;

/// Handle to one wallet RPC server. Nothing is cached: balances and
/// transfers change whenever the wallet syncs.
pub struct Wallet {
    backend: Arc<dyn WalletBackend>,
}

impl Wallet {
    pub fn new(backend: Arc<dyn WalletBackend>) -> Self {
        Self { backend }
    }

    /// JSON-RPC wallet over HTTP
    pub fn connect(config: &TransportConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(JsonRpcWallet::connect(config)?)))
    }

    /// Height the wallet has synchronized to
    pub async fn height(&self) -> Result<u64> {
        self.backend.height().await
    }

    /// The wallet's master address
    pub async fn address(&self) -> Result<Address> {
        self.backend.address(None).await
    }

    pub async fn addresses(&self) -> Result<Vec<Address>> {
        self.backend.addresses(None).await
    }

    pub async fn balances(&self) -> Result<Balances> {
        self.backend.balances(None).await
    }

    /// Total balance, or only the spendable part when `unlocked` is set
    pub async fn balance(&self, unlocked: bool) -> Result<Amount> {
        self.backend.balance(None, unlocked).await
    }

    pub async fn accounts(&self) -> Result<Vec<Account>> {
        self.backend.accounts().await
    }

    /// Scopes the queries below to account `index`.
    pub fn account(&self, index: u32) -> WalletAccount<'_> {
        WalletAccount { wallet: self, index }
    }

    pub async fn payments_in(&self) -> Result<Vec<Payment>> {
        self.backend.payments_in(None).await
    }

    pub async fn payments_out(&self) -> Result<Vec<Payment>> {
        self.backend.payments_out(None).await
    }
}

/// Queries against a single account of a [`Wallet`]
#[derive(Clone, Copy)]
pub struct WalletAccount<'a> {
    wallet: &'a Wallet,
    index: u32,
}

impl WalletAccount<'_> {
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The account's primary address
    pub async fn address(&self) -> Result<Address> {
        self.wallet.backend.address(Some(self.index)).await
    }

    pub async fn addresses(&self) -> Result<Vec<Address>> {
        self.wallet.backend.addresses(Some(self.index)).await
    }

    pub async fn balances(&self) -> Result<Balances> {
        self.wallet.backend.balances(Some(self.index)).await
    }

    pub async fn balance(&self, unlocked: bool) -> Result<Amount> {
        self.wallet.backend.balance(Some(self.index), unlocked).await
    }

    pub async fn payments_in(&self) -> Result<Vec<Payment>> {
        self.wallet.backend.payments_in(Some(self.index)).await
    }

    pub async fn payments_out(&self) -> Result<Vec<Payment>> {
        self.wallet.backend.payments_out(Some(self.index)).await
    }
}
