use std::sync::Arc;

use rpc_core::{JsonRpcWallet, MockTransport};
use serde_json::json;
use xmr_client::{Amount, Wallet, PICONERO_PER_XMR};

fn addr(c: char) -> String {
    format!("5{}", c.to_string().repeat(94))
}

fn setup() -> (Arc<MockTransport>, Wallet) {
    let mock = Arc::new(MockTransport::new());
    let wallet = Wallet::new(Arc::new(JsonRpcWallet::new(mock.clone())));
    (mock, wallet)
}

#[tokio::test]
async fn wallet_queries_use_the_master_account() {
    let (mock, wallet) = setup();
    mock.on_json_rpc("get_address", json!({ "address": addr('A'), "addresses": [] }));
    mock.on_json_rpc(
        "get_balance",
        json!({ "balance": 4 * PICONERO_PER_XMR, "unlocked_balance": PICONERO_PER_XMR }),
    );

    assert_eq!(wallet.address().await.unwrap().as_str(), addr('A'));
    assert_eq!(wallet.balance(false).await.unwrap(), "4".parse::<Amount>().unwrap());
    assert_eq!(wallet.balance(true).await.unwrap(), "1".parse::<Amount>().unwrap());

    for call in mock.calls() {
        assert_eq!(call.params["account_index"], json!(0));
    }
}

#[tokio::test]
async fn account_handle_scopes_every_call() {
    let (mock, wallet) = setup();
    mock.on_json_rpc(
        "get_address",
        json!({
            "address": addr('D'),
            "addresses": [
                { "address": addr('E'), "address_index": 1 },
                { "address": addr('D'), "address_index": 0 }
            ]
        }),
    );
    mock.on_json_rpc(
        "get_balance",
        json!({ "balance": 7 * PICONERO_PER_XMR, "unlocked_balance": 5 * PICONERO_PER_XMR }),
    );
    mock.on_json_rpc("get_transfers", json!({}));

    let account = wallet.account(3);
    assert_eq!(account.index(), 3);
    assert_eq!(account.address().await.unwrap().as_str(), addr('D'));
    assert_eq!(account.addresses().await.unwrap().len(), 2);
    assert_eq!(account.balances().await.unwrap().locked(), "2".parse::<Amount>().unwrap());
    assert_eq!(account.balance(true).await.unwrap(), "5".parse::<Amount>().unwrap());
    assert!(account.payments_in().await.unwrap().is_empty());
    assert!(account.payments_out().await.unwrap().is_empty());

    let calls = mock.calls();
    assert_eq!(calls.len(), 6);
    for call in calls {
        assert_eq!(call.params["account_index"], json!(3));
    }
}

#[tokio::test]
async fn nothing_is_cached() {
    let (mock, wallet) = setup();
    mock.on_json_rpc("get_height", json!({ "height": 10 }));
    mock.on_json_rpc("get_height", json!({ "height": 11 }));

    assert_eq!(wallet.height().await.unwrap(), 10);
    assert_eq!(wallet.height().await.unwrap(), 11);
    assert_eq!(mock.call_count("get_height"), 2);
}
