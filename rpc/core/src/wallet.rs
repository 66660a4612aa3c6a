//! `monero-wallet-rpc` backend over [`Transport`]

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;
use xmr_core::{
    Account, Address, Amount, Balances, Destination, Payment, PaymentDirection, PaymentId,
};

use crate::api::WalletBackend;
use crate::daemon::{parse_hash, parse_timestamp};
use crate::http::HttpTransport;
use crate::model::*;
use crate::transport::{Transport, TransportConfig};

/// Wallet error codes for an index the wallet does not have
const ACCOUNT_INDEX_OUT_OF_BOUND: i64 = -14;
const ADDRESS_INDEX_OUT_OF_BOUND: i64 = -15;

pub struct JsonRpcWallet {
    transport: Arc<dyn Transport>,
}

impl JsonRpcWallet {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// HTTP transport to the wallet RPC server described by `config`
    pub fn connect(config: &TransportConfig) -> Result<Self, RpcError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    async fn call<T: serde::de::DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        match self.transport.json_rpc(method, params).await {
            Ok(result) => Ok(serde_json::from_value(result)?),
            Err(RpcError::Rpc { code, message })
                if code == ACCOUNT_INDEX_OUT_OF_BOUND || code == ADDRESS_INDEX_OUT_OF_BOUND =>
            {
                Err(RpcError::NotFound(message))
            }
            Err(e) => Err(e),
        }
    }

    async fn raw_addresses(&self, account: u32) -> Result<RawAddresses, RpcError> {
        self.call("get_address", json!({ "account_index": account })).await
    }

    async fn transfers(&self, account: u32, direction: PaymentDirection) -> Result<Vec<Payment>, RpcError> {
        let params = match direction {
            PaymentDirection::Incoming => json!({ "account_index": account, "in": true, "pool": true }),
            PaymentDirection::Outgoing => json!({ "account_index": account, "out": true, "pending": true }),
        };
        let raw: RawTransfers = self.call("get_transfers", params).await?;
        // Confirmed entries first, then the unconfirmed ones, as the wallet groups them.
        let (confirmed, unconfirmed) = match direction {
            PaymentDirection::Incoming => (raw.incoming, raw.pool),
            PaymentDirection::Outgoing => (raw.out, raw.pending),
        };
        debug!(account, ?direction, confirmed = confirmed.len(), unconfirmed = unconfirmed.len(), "transfers fetched");

        let confirmed = confirmed.into_iter().map(|t| (t, true));
        let unconfirmed = unconfirmed.into_iter().map(|t| (t, false));
        confirmed
            .chain(unconfirmed)
            .map(|(transfer, mined)| build_payment(transfer, direction, account, mined))
            .collect()
    }
}

#[async_trait]
impl WalletBackend for JsonRpcWallet {
    async fn height(&self) -> Result<u64, RpcError> {
        let raw: RawWalletHeight = self.call("get_height", json!({})).await?;
        Ok(raw.height)
    }

    async fn address(&self, account: Option<u32>) -> Result<Address, RpcError> {
        let raw = self.raw_addresses(account.unwrap_or(0)).await?;
        parse_address(&raw.address)
    }

    async fn addresses(&self, account: Option<u32>) -> Result<Vec<Address>, RpcError> {
        let raw = self.raw_addresses(account.unwrap_or(0)).await?;
        let mut entries = raw.addresses;
        entries.sort_by_key(|entry| entry.address_index);
        entries.iter().map(|entry| parse_address(&entry.address)).collect()
    }

    async fn balances(&self, account: Option<u32>) -> Result<Balances, RpcError> {
        let raw: RawBalance = self
            .call("get_balance", json!({ "account_index": account.unwrap_or(0) }))
            .await?;
        Ok(Balances::new(
            Amount::from_atomic(raw.balance),
            Amount::from_atomic(raw.unlocked_balance),
        ))
    }

    async fn accounts(&self) -> Result<Vec<Account>, RpcError> {
        let raw: RawAccounts = self.call("get_accounts", json!({})).await?;
        let mut accounts = Vec::with_capacity(raw.subaddress_accounts.len());
        for entry in raw.subaddress_accounts {
            let addresses = self.addresses(Some(entry.account_index)).await?;
            accounts.push(Account {
                index: entry.account_index,
                label: entry.label,
                tag: Some(entry.tag).filter(|tag| !tag.is_empty()),
                addresses,
                balances: Balances::new(
                    Amount::from_atomic(entry.balance),
                    Amount::from_atomic(entry.unlocked_balance),
                ),
            });
        }
        Ok(accounts)
    }

    async fn payments_in(&self, account: Option<u32>) -> Result<Vec<Payment>, RpcError> {
        self.transfers(account.unwrap_or(0), PaymentDirection::Incoming).await
    }

    async fn payments_out(&self, account: Option<u32>) -> Result<Vec<Payment>, RpcError> {
        self.transfers(account.unwrap_or(0), PaymentDirection::Outgoing).await
    }
}

fn parse_address(s: &str) -> Result<Address, RpcError> {
    s.parse()
        .map_err(|_| RpcError::Malformed(format!("invalid address {:?} in response", s)))
}

fn build_payment(raw: RawTransfer, direction: PaymentDirection, account: u32, mined: bool) -> Result<Payment, RpcError> {
    let payment_id = PaymentId::parse_optional(&raw.payment_id)
        .map_err(|_| RpcError::Malformed(format!("invalid payment id {:?} in response", raw.payment_id)))?;
    let local_address = match direction {
        PaymentDirection::Incoming if !raw.address.is_empty() => Some(parse_address(&raw.address)?),
        _ => None,
    };
    let destinations = raw
        .destinations
        .iter()
        .map(|d| {
            Ok(Destination {
                address: parse_address(&d.address)?,
                amount: Amount::from_atomic(d.amount),
            })
        })
        .collect::<Result<Vec<_>, RpcError>>()?;

    Ok(Payment {
        direction,
        tx_hash: parse_hash(&raw.txid)?,
        timestamp: parse_timestamp(raw.timestamp)?,
        amount: Amount::from_atomic(raw.amount),
        fee: match direction {
            PaymentDirection::Incoming => Amount::ZERO,
            PaymentDirection::Outgoing => Amount::from_atomic(raw.fee),
        },
        payment_id,
        height: Some(raw.height).filter(|height| mined && *height > 0),
        account_index: account,
        subaddress_index: raw.subaddr_index.minor,
        local_address,
        destinations,
        note: raw.note,
    })
}
