use log::debug;
use serde_json::{Value, json};

use crate::http::{JsonMap, NestedStringMap, NodeHttpClient, RpcError, StringMap, SuccessConvention};

/// Balance of one account, in raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountBalance {
    /// Received balance.
    pub balance: String,
    /// Sent to the account but not yet received.
    pub pending: String,
}

impl NodeHttpClient {
    /// Creates a new account, inserting the next deterministic key in `wallet`.
    ///
    /// With `work` false, work generation is disabled for the new account.
    pub async fn account_create(&self, wallet: &str, work: bool) -> Result<String, RpcError> {
        self.fetch_string("account_create", json!({ "wallet": wallet, "work": work }), "account")
            .await
    }

    /// Account number for a public key.
    pub async fn account_get(&self, key: &str) -> Result<String, RpcError> {
        self.fetch_string("account_get", json!({ "key": key }), "account").await
    }

    /// Frontier, open block, representative block, balance, modification time and block count.
    ///
    /// `representative`, `weight` and `pending` request the respective extra fields.
    pub async fn account_info(
        &self,
        account: &str,
        representative: bool,
        weight: bool,
        pending: bool,
    ) -> Result<StringMap, RpcError> {
        let params = json!({
            "account": account,
            "representative": representative,
            "weight": weight,
            "pending": pending,
        });
        self.fetch_map("account_info", params, "").await
    }

    pub async fn account_balance(&self, account: &str) -> Result<AccountBalance, RpcError> {
        debug!(account = account; "Fetching account balance");
        let mut response = self.fetch_map("account_balance", json!({ "account": account }), "").await?;

        let mut field = |key: &str| {
            response.remove(key).ok_or_else(|| RpcError::MissingKey {
                action: "account_balance".to_string(),
                key: key.to_string(),
            })
        };
        let balance = field("balance")?;
        let pending = field("pending")?;

        Ok(AccountBalance { balance, pending })
    }

    pub async fn account_block_count(&self, account: &str) -> Result<i64, RpcError> {
        self.fetch_int("account_block_count", json!({ "account": account }), "block_count")
            .await
    }

    /// Send and receive history of an account, newest first.
    pub async fn account_history(&self, account: &str, count: u64) -> Result<Vec<StringMap>, RpcError> {
        let value = self
            .fetch_value("account_history", json!({ "account": account, "count": count }), "history")
            .await?;
        history_entries("account_history", value)
    }

    pub async fn account_key(&self, account: &str) -> Result<String, RpcError> {
        self.fetch_string("account_key", json!({ "account": account }), "key").await
    }

    pub async fn account_representative(&self, account: &str) -> Result<String, RpcError> {
        self.fetch_string("account_representative", json!({ "account": account }), "representative")
            .await
    }

    /// Sets the representative of `account` in `wallet`, returning the change block hash.
    ///
    /// `work` is only sent when non-empty.
    pub async fn account_representative_set(
        &self,
        wallet: &str,
        account: &str,
        representative: &str,
        work: &str,
    ) -> Result<String, RpcError> {
        let mut params = json!({
            "wallet": wallet,
            "account": account,
            "representative": representative,
        });
        if !work.is_empty() {
            params["work"] = Value::from(work);
        }
        self.fetch_string("account_representative_set", params, "block").await
    }

    /// Voting weight of an account, in raw.
    pub async fn account_weight(&self, account: &str) -> Result<String, RpcError> {
        self.fetch_string("account_weight", json!({ "account": account }), "weight")
            .await
    }

    pub async fn accounts_balances(&self, accounts: &[&str]) -> Result<NestedStringMap, RpcError> {
        self.fetch_map_of_maps("accounts_balances", json!({ "accounts": accounts }), "balances")
            .await
    }

    /// Head block hash of each account.
    pub async fn accounts_frontiers(&self, accounts: &[&str]) -> Result<StringMap, RpcError> {
        self.fetch_map("accounts_frontiers", json!({ "accounts": accounts }), "frontiers")
            .await
    }

    /// Pending blocks per account. Values are lists, or maps when `threshold` or `source` is set.
    pub async fn accounts_pending(
        &self,
        accounts: &[&str],
        count: u64,
        threshold: Option<&str>,
        source: bool,
    ) -> Result<JsonMap, RpcError> {
        let mut params = json!({ "accounts": accounts, "count": count });
        if let Some(threshold) = threshold {
            params["threshold"] = Value::from(threshold);
        }
        if source {
            params["source"] = Value::from(true);
        }
        self.fetch_map_interface("accounts_pending", params, "blocks").await
    }

    /// Accounts delegating to `account`, with their balances.
    pub async fn delegators(&self, account: &str) -> Result<StringMap, RpcError> {
        self.fetch_map("delegators", json!({ "account": account }), "delegators")
            .await
    }

    pub async fn delegators_count(&self, account: &str) -> Result<i64, RpcError> {
        self.fetch_int("delegators_count", json!({ "account": account }), "count")
            .await
    }

    /// Up to `count` account/frontier pairs starting at `account`.
    pub async fn frontiers(&self, account: &str, count: u64) -> Result<StringMap, RpcError> {
        self.fetch_map("frontiers", json!({ "account": account, "count": count }), "frontiers")
            .await
    }

    /// Waits for `amount` to arrive at `account`, for at most `timeout` milliseconds.
    pub async fn payment_wait(&self, account: &str, amount: &str, timeout: u64) -> Result<String, RpcError> {
        let params = json!({ "account": account, "amount": amount, "timeout": timeout });
        self.fetch_string("payment_wait", params, "status").await
    }

    pub async fn validate_account_number(&self, account: &str) -> Result<bool, RpcError> {
        self.is_success(
            "validate_account_number",
            json!({ "account": account }),
            SuccessConvention::flag("valid"),
        )
        .await
    }

    /// Blocks not yet received by `account`.
    ///
    /// Without `threshold` and `source` the node answers with a list of
    /// hashes; otherwise with a map keyed by hash. The raw JSON is returned.
    pub async fn pending(
        &self,
        account: &str,
        count: u64,
        threshold: Option<&str>,
        source: bool,
    ) -> Result<Value, RpcError> {
        let mut params = json!({ "account": account, "count": count, "source": source });
        if let Some(threshold) = threshold {
            params["threshold"] = Value::from(threshold);
        }
        self.fetch_value("pending", params, "blocks").await
    }

    pub async fn work_get(&self, wallet: &str, account: &str) -> Result<String, RpcError> {
        self.fetch_string("work_get", json!({ "wallet": wallet, "account": account }), "work")
            .await
    }

    pub async fn work_set(&self, wallet: &str, account: &str, work: &str) -> Result<bool, RpcError> {
        let params = json!({ "wallet": wallet, "account": account, "work": work });
        self.is_success("work_set", params, SuccessConvention::Presence).await
    }
}

/// History lists are encoded like other lists: `""` when there is no history.
pub(crate) fn history_entries(action: &str, value: Value) -> Result<Vec<StringMap>, RpcError> {
    match value {
        Value::String(s) if s.is_empty() => Ok(Vec::new()),
        other => serde_json::from_value(other).map_err(|source| RpcError::Shape {
            action: action.to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use url::Url;
    use wiremock::matchers::{body_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ACCOUNT: &str = "xrb_3e3j5tkog48pnny9dmfzj1r16pg8t1e76dz5tmac6iq689wyjfpiij4txtdo";

    async fn mock_node(request: Value, response: Value) -> (MockServer, NodeHttpClient) {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_json(request))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = ClientConfig {
            url: Url::parse(&mock_server.uri()).unwrap(),
            ..ClientConfig::default()
        };
        (mock_server, NodeHttpClient::new(&config).unwrap())
    }

    #[tokio::test]
    async fn test_account_balance() {
        let (_server, client) = mock_node(
            json!({ "action": "account_balance", "account": ACCOUNT }),
            json!({ "balance": "10000", "pending": "10000" }),
        )
        .await;

        let balance = client.account_balance(ACCOUNT).await.unwrap();
        assert_eq!(
            balance,
            AccountBalance {
                balance: "10000".into(),
                pending: "10000".into()
            }
        );
    }

    #[tokio::test]
    async fn test_account_balance_missing_pending() {
        let (_server, client) = mock_node(
            json!({ "action": "account_balance", "account": ACCOUNT }),
            json!({ "balance": "10000" }),
        )
        .await;

        let err = client.account_balance(ACCOUNT).await.unwrap_err();
        assert!(matches!(err, RpcError::MissingKey { ref key, .. } if key == "pending"));
    }

    #[tokio::test]
    async fn test_account_block_count() {
        let (_server, client) = mock_node(
            json!({ "action": "account_block_count", "account": ACCOUNT }),
            json!({ "block_count": "19" }),
        )
        .await;

        assert_eq!(client.account_block_count(ACCOUNT).await.unwrap(), 19);
    }

    #[tokio::test]
    async fn test_account_history() {
        let (_server, client) = mock_node(
            json!({ "action": "account_history", "account": ACCOUNT, "count": 1 }),
            json!({
                "history": [{
                    "hash": "000D1BAEC8EC208142C99059B393051BAC8380F9B5A2E6B2489A277D81789F3F",
                    "type": "receive",
                    "account": ACCOUNT,
                    "amount": "100000000000000000000000000000000"
                }]
            }),
        )
        .await;

        let history = client.account_history(ACCOUNT, 1).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["type"], "receive");
    }

    #[tokio::test]
    async fn test_account_representative_set_omits_empty_work() {
        let (_server, client) = mock_node(
            json!({
                "action": "account_representative_set",
                "wallet": "000D",
                "account": ACCOUNT,
                "representative": "xrb_rep",
            }),
            json!({ "block": "000D1BAEC8EC208142C99059B393051BAC8380F9B5A2E6B2489A277D81789F3F" }),
        )
        .await;

        let block = client
            .account_representative_set("000D", ACCOUNT, "xrb_rep", "")
            .await
            .unwrap();
        assert_eq!(block, "000D1BAEC8EC208142C99059B393051BAC8380F9B5A2E6B2489A277D81789F3F");
    }

    #[tokio::test]
    async fn test_accounts_balances() {
        let (_server, client) = mock_node(
            json!({ "action": "accounts_balances", "accounts": [ACCOUNT] }),
            json!({ "balances": { ACCOUNT: { "balance": "10000", "pending": "0" } } }),
        )
        .await;

        let balances = client.accounts_balances(&[ACCOUNT]).await.unwrap();
        assert_eq!(balances[ACCOUNT]["balance"], "10000");
    }

    #[tokio::test]
    async fn test_validate_account_number() {
        let (_server, client) = mock_node(
            json!({ "action": "validate_account_number", "account": ACCOUNT }),
            json!({ "valid": "1" }),
        )
        .await;

        assert!(client.validate_account_number(ACCOUNT).await.unwrap());
    }

    #[tokio::test]
    async fn test_delegators_count_not_numeric() {
        let (_server, client) = mock_node(
            json!({ "action": "delegators_count", "account": ACCOUNT }),
            json!({ "count": "many" }),
        )
        .await;

        let err = client.delegators_count(ACCOUNT).await.unwrap_err();
        assert!(matches!(err, RpcError::Parse { .. }));
    }

    #[test]
    fn test_history_entries_empty_string() {
        assert!(history_entries("account_history", json!("")).unwrap().is_empty());
        assert!(matches!(
            history_entries("account_history", json!("x")),
            Err(RpcError::Shape { .. })
        ));
    }
}
