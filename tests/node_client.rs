use std::time::Duration;

use nano_rpc::http::SuccessConvention;
use nano_rpc::units::{self, Denomination};
use nano_rpc::{ClientConfig, NodeHttpClient, RpcError};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACCOUNT: &str = "xrb_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3";

fn client_for(server: &MockServer) -> NodeHttpClient {
    let config = ClientConfig {
        url: Url::parse(&server.uri()).unwrap(),
        timeout: Duration::from_secs(5),
        max_retries: 0,
    };
    NodeHttpClient::new(&config).unwrap()
}

async fn respond(server: &MockServer, action: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "action": action })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn balance_in_mxrb_is_exact() {
    let server = MockServer::start().await;
    respond(
        &server,
        "account_balance",
        json!({ "balance": "325586539664609129644855132177", "pending": "0" }),
    )
    .await;

    let client = client_for(&server);
    let balance = client.account_balance(ACCOUNT).await.unwrap();

    let mxrb = units::mrai_from_raw(&balance.balance).unwrap();
    assert_eq!(mxrb, "0.325586539664609129644855132177");
    assert_eq!(units::mrai_to_raw(&mxrb).unwrap(), balance.balance);

    let amount: units::Amount = balance.balance.parse().unwrap();
    assert_eq!(amount.to_raw_u128().unwrap(), 325586539664609129644855132177);
    let converted = units::convert_amount(&amount, Denomination::Raw, Denomination::MegaXrb).unwrap();
    assert_eq!(converted.to_string(), mxrb);
}

#[tokio::test]
async fn every_list_encoding_is_accepted() {
    let server = MockServer::start().await;
    respond(&server, "account_list", json!({ "accounts": "" })).await;
    respond(&server, "accounts_create", json!({ "accounts": ["xrb_1", "xrb_2"] })).await;
    respond(&server, "wallet_republish", json!({ "blocks": "nonempty" })).await;

    let client = client_for(&server);

    assert!(client.account_list("000D").await.unwrap().is_empty());
    assert_eq!(client.accounts_create("000D", 2, false).await.unwrap(), vec!["xrb_1", "xrb_2"]);

    let err = client.wallet_republish("000D", 2).await.unwrap_err();
    assert!(matches!(err, RpcError::Type { .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn success_conventions_are_selected_per_action() {
    let server = MockServer::start().await;
    respond(&server, "work_set", json!({ "success": "" })).await;
    respond(&server, "account_remove", json!({ "removed": "0" })).await;

    let client = client_for(&server);

    assert!(client.work_set("000D", ACCOUNT, "2bf29ef00786a6bc").await.unwrap());
    assert!(!client.account_remove("000D", ACCOUNT).await.unwrap());

    // The same body read under the other convention gives the opposite answer.
    let flag = client
        .is_success("work_set", json!({}), SuccessConvention::flag("success"))
        .await
        .unwrap();
    assert!(!flag);
}

#[tokio::test]
async fn node_errors_are_reported_as_node_errors() {
    let server = MockServer::start().await;
    respond(&server, "account_block_count", json!({ "error": "Account not found" })).await;

    let client = client_for(&server);
    let err = client.account_block_count(ACCOUNT).await.unwrap_err();

    match err {
        RpcError::Node { action, message } => {
            assert_eq!(action, "account_block_count");
            assert_eq!(message, "Account not found");
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn refused_connection_is_not_retried() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let config = ClientConfig {
        url: Url::parse(&uri).unwrap(),
        ..ClientConfig::default()
    };
    let client = NodeHttpClient::new(&config).unwrap();

    let err = client.block_count().await.unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err}");
}

#[tokio::test]
async fn single_attempt_per_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.block_count().await.unwrap_err();

    assert!(matches!(err, RpcError::Shape { .. }), "unexpected error: {err}");
}
