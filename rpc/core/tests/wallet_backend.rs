use std::sync::Arc;

use rpc_core::{JsonRpcWallet, MockTransport, RpcError, WalletBackend};
use serde_json::{json, Value};
use xmr_core::{Amount, PaymentDirection, PICONERO_PER_XMR};

const TX_IN: &str = "f34b495cec77822a70f829ec8a5a7f1e727128d62e6b1438e9cb7799654d610e";
const TX_POOL: &str = "0a4ce2b0c6c14aa7e0a8d4e0e1c8b58d2b6e8eefb7ab6c2e7d98e1bd1c2c3d4e";
const TX_OUT: &str = "7e3db6c59c02d870f18b37a37cfc5857eeb5412df4ea00bb1971f3095f72b0d8";

fn setup() -> (Arc<MockTransport>, JsonRpcWallet) {
    let mock = Arc::new(MockTransport::new());
    let wallet = JsonRpcWallet::new(mock.clone());
    (mock, wallet)
}

/// A 95-character address built from one repeated base58 character.
fn addr(c: char) -> String {
    format!("5{}", c.to_string().repeat(94))
}

fn address_list(base: char, subs: &[char]) -> Value {
    let mut addresses = vec![json!({ "address": addr(base), "address_index": 0, "label": "Primary account", "used": true })];
    for (i, c) in subs.iter().enumerate() {
        addresses.push(json!({ "address": addr(*c), "address_index": i + 1, "label": "", "used": false }));
    }
    json!({ "address": addr(base), "addresses": addresses })
}

#[tokio::test]
async fn balance_figures_come_from_one_query() {
    let (mock, wallet) = setup();
    mock.on_json_rpc(
        "get_balance",
        json!({
            "balance": 10 * PICONERO_PER_XMR,
            "unlocked_balance": 8 * PICONERO_PER_XMR,
            "multisig_import_needed": false
        }),
    );

    let balances = wallet.balances(None).await.unwrap();
    assert_eq!(balances.total, "10".parse::<Amount>().unwrap());
    assert_eq!(balances.unlocked, "8".parse::<Amount>().unwrap());
    assert_eq!(balances.locked(), "2".parse::<Amount>().unwrap());
    assert_eq!(mock.call_count("get_balance"), 1);

    assert_eq!(wallet.balance(None, false).await.unwrap(), "10".parse::<Amount>().unwrap());
    assert_eq!(wallet.balance(None, true).await.unwrap(), "8".parse::<Amount>().unwrap());
    assert_eq!(mock.call_count("get_balance"), 3);
    assert_eq!(mock.calls()[0].params, json!({ "account_index": 0 }));
}

#[tokio::test]
async fn address_and_subaddresses() {
    let (mock, wallet) = setup();
    // Listed out of order on purpose.
    mock.on_json_rpc(
        "get_address",
        json!({
            "address": addr('A'),
            "addresses": [
                { "address": addr('C'), "address_index": 2 },
                { "address": addr('A'), "address_index": 0 },
                { "address": addr('B'), "address_index": 1 }
            ]
        }),
    );

    assert_eq!(wallet.address(Some(1)).await.unwrap().as_str(), addr('A'));
    let addresses = wallet.addresses(Some(1)).await.unwrap();
    let listed: Vec<&str> = addresses.iter().map(|a| a.as_str()).collect();
    assert_eq!(listed, vec![addr('A'), addr('B'), addr('C')]);
    assert_eq!(mock.calls()[1].params, json!({ "account_index": 1 }));
}

#[tokio::test]
async fn accounts_carry_addresses_and_balances() {
    let (mock, wallet) = setup();
    mock.on_json_rpc(
        "get_accounts",
        json!({
            "subaddress_accounts": [
                { "account_index": 0, "base_address": addr('A'), "balance": 3 * PICONERO_PER_XMR, "unlocked_balance": 3 * PICONERO_PER_XMR, "label": "Primary account", "tag": "" },
                { "account_index": 1, "base_address": addr('D'), "balance": 7 * PICONERO_PER_XMR, "unlocked_balance": 5 * PICONERO_PER_XMR, "label": "Savings", "tag": "cold" }
            ],
            "total_balance": 10 * PICONERO_PER_XMR,
            "total_unlocked_balance": 8 * PICONERO_PER_XMR
        }),
    );
    mock.on_json_rpc("get_address", address_list('A', &['B', 'C']));
    mock.on_json_rpc("get_address", address_list('D', &[]));

    let accounts = wallet.accounts().await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].index, 0);
    assert_eq!(accounts[0].addresses.len(), 3);
    assert_eq!(accounts[0].tag, None);
    assert_eq!(accounts[1].label, "Savings");
    assert_eq!(accounts[1].tag.as_deref(), Some("cold"));
    assert_eq!(accounts[1].base_address().unwrap().as_str(), addr('D'));
    assert_eq!(accounts[1].balances.locked(), "2".parse::<Amount>().unwrap());

    let calls = mock.calls();
    assert_eq!(calls[1].params, json!({ "account_index": 0 }));
    assert_eq!(calls[2].params, json!({ "account_index": 1 }));
}

#[tokio::test]
async fn incoming_payments_include_pool() {
    let (mock, wallet) = setup();
    mock.on_json_rpc(
        "get_transfers",
        json!({
            "in": [{
                "txid": TX_IN,
                "payment_id": "0000000000000000",
                "height": 1_087_606,
                "timestamp": 1_525_000_000,
                "amount": 2_000_000_000_000u64,
                "fee": 30_000_000u64,
                "note": "",
                "address": addr('B'),
                "subaddr_index": { "major": 0, "minor": 1 },
                "type": "in"
            }],
            "pool": [{
                "txid": TX_POOL,
                "payment_id": "feedbeef00000000",
                "height": 0,
                "timestamp": 1_525_100_000,
                "amount": 500_000_000_000u64,
                "fee": 30_000_000u64,
                "address": addr('A'),
                "subaddr_index": { "major": 0, "minor": 0 },
                "type": "pool"
            }]
        }),
    );

    let payments = wallet.payments_in(None).await.unwrap();
    assert_eq!(payments.len(), 2);

    let mined = &payments[0];
    assert_eq!(mined.direction, PaymentDirection::Incoming);
    assert_eq!(mined.tx_hash.to_hex(), TX_IN);
    assert_eq!(mined.height, Some(1_087_606));
    assert_eq!(mined.amount, "2".parse::<Amount>().unwrap());
    assert_eq!(mined.fee, Amount::ZERO);
    assert_eq!(mined.payment_id, None);
    assert_eq!(mined.subaddress_index, 1);
    assert_eq!(mined.local_address.as_ref().unwrap().as_str(), addr('B'));

    let pending = &payments[1];
    assert_eq!(pending.height, None);
    assert!(!pending.is_confirmed());
    assert_eq!(pending.payment_id.as_ref().unwrap().as_str(), "feedbeef00000000");

    assert_eq!(
        mock.calls()[0].params,
        json!({ "account_index": 0, "in": true, "pool": true })
    );
}

#[tokio::test]
async fn outgoing_payments_carry_fee_and_destinations() {
    let (mock, wallet) = setup();
    mock.on_json_rpc(
        "get_transfers",
        json!({
            "out": [{
                "txid": TX_OUT,
                "payment_id": "",
                "height": 1_087_700,
                "timestamp": 1_525_200_000,
                "amount": 1_000_000_000_000u64,
                "fee": 41_000_000u64,
                "destinations": [{ "address": addr('Z'), "amount": 1_000_000_000_000u64 }],
                "subaddr_index": { "major": 2, "minor": 0 },
                "type": "out"
            }]
        }),
    );

    let payments = wallet.payments_out(Some(2)).await.unwrap();
    assert_eq!(payments.len(), 1);
    let payment = &payments[0];
    assert_eq!(payment.direction, PaymentDirection::Outgoing);
    assert_eq!(payment.account_index, 2);
    assert_eq!(payment.fee, Amount::from_atomic(41_000_000));
    assert_eq!(payment.destinations.len(), 1);
    assert_eq!(payment.destinations[0].amount, "1".parse::<Amount>().unwrap());
    assert_eq!(payment.local_address, None);

    assert_eq!(
        mock.calls()[0].params,
        json!({ "account_index": 2, "out": true, "pending": true })
    );
}

#[tokio::test]
async fn no_transfers_is_empty() {
    let (mock, wallet) = setup();
    mock.on_json_rpc("get_transfers", json!({}));
    assert!(wallet.payments_in(None).await.unwrap().is_empty());
    assert!(wallet.payments_out(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_account_is_not_found() {
    let (mock, wallet) = setup();
    mock.fail(
        "get_balance",
        RpcError::Rpc {
            code: -14,
            message: "account index is out of bound".to_string(),
        },
    );
    assert!(matches!(wallet.balances(Some(9)).await, Err(RpcError::NotFound(_))));
}

#[tokio::test]
async fn wallet_height() {
    let (mock, wallet) = setup();
    mock.on_json_rpc("get_height", json!({ "height": 1_087_800 }));
    assert_eq!(wallet.height().await.unwrap(), 1_087_800);
}
