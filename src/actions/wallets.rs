use log::info;
use serde_json::{Value, json};

use crate::http::{JsonMap, NestedStringMap, NodeHttpClient, RpcError, StringMap, SuccessConvention};

impl NodeHttpClient {
    pub async fn account_list(&self, wallet: &str) -> Result<Vec<String>, RpcError> {
        self.fetch_slice("account_list", json!({ "wallet": wallet }), "accounts")
            .await
    }

    /// Moves `accounts` from wallet `source` into `wallet`.
    pub async fn account_move(&self, wallet: &str, source: &str, accounts: &[&str]) -> Result<bool, RpcError> {
        let params = json!({ "wallet": wallet, "source": source, "accounts": accounts });
        self.is_success("account_move", params, SuccessConvention::flag("moved"))
            .await
    }

    pub async fn account_remove(&self, wallet: &str, account: &str) -> Result<bool, RpcError> {
        let params = json!({ "wallet": wallet, "account": account });
        self.is_success("account_remove", params, SuccessConvention::flag("removed"))
            .await
    }

    /// Creates `count` deterministic accounts in `wallet`.
    pub async fn accounts_create(&self, wallet: &str, count: u64, work: bool) -> Result<Vec<String>, RpcError> {
        let params = json!({ "wallet": wallet, "count": count, "work": work });
        self.fetch_slice("accounts_create", params, "accounts").await
    }

    /// Begins a new payment session, returning an account to receive on.
    pub async fn payment_begin(&self, wallet: &str) -> Result<String, RpcError> {
        self.fetch_string("payment_begin", json!({ "wallet": wallet }), "account")
            .await
    }

    /// Marks all accounts in `wallet` as available for payment sessions.
    pub async fn payment_init(&self, wallet: &str) -> Result<String, RpcError> {
        self.fetch_string("payment_init", json!({ "wallet": wallet }), "status")
            .await
    }

    /// Ends a payment session, returning `account` to the free pool.
    pub async fn payment_end(&self, wallet: &str, account: &str) -> Result<(), RpcError> {
        self.execute("payment_end", json!({ "wallet": wallet, "account": account }))
            .await
    }

    /// Receives pending `block` into `account`, returning the receive block hash.
    ///
    /// `work` is only sent when non-empty.
    pub async fn receive(&self, wallet: &str, account: &str, block: &str, work: &str) -> Result<String, RpcError> {
        let mut params = json!({ "wallet": wallet, "account": account, "block": block });
        if !work.is_empty() {
            params["work"] = Value::from(work);
        }
        self.fetch_string("receive", params, "block").await
    }

    pub async fn wallet_representative(&self, wallet: &str) -> Result<String, RpcError> {
        self.fetch_string("wallet_representative", json!({ "wallet": wallet }), "representative")
            .await
    }

    pub async fn wallet_representative_set(&self, wallet: &str, representative: &str) -> Result<bool, RpcError> {
        let params = json!({ "wallet": wallet, "representative": representative });
        self.is_success("wallet_representative_set", params, SuccessConvention::flag("set"))
            .await
    }

    /// Starts a search for pending blocks for every account in `wallet`.
    pub async fn search_pending(&self, wallet: &str) -> Result<bool, RpcError> {
        self.is_success(
            "search_pending",
            json!({ "wallet": wallet }),
            SuccessConvention::flag("started"),
        )
        .await
    }

    /// Sends `amount` raw from `source` to `destination`, returning the send block hash.
    ///
    /// `id` makes the send idempotent: repeating a call with the same id
    /// returns the first block instead of sending again. `work` is only sent
    /// when non-empty.
    pub async fn send(
        &self,
        wallet: &str,
        source: &str,
        destination: &str,
        amount: &str,
        id: &str,
        work: &str,
    ) -> Result<String, RpcError> {
        info!(
            source = source,
            destination = destination,
            amount = amount;
            "Sending funds"
        );

        let mut params = json!({
            "wallet": wallet,
            "source": source,
            "destination": destination,
            "amount": amount,
            "id": id,
        });
        if !work.is_empty() {
            params["work"] = Value::from(work);
        }
        self.fetch_string("send", params, "block").await
    }

    /// Adds an adhoc private key to `wallet`, returning its account.
    pub async fn wallet_add(&self, wallet: &str, key: &str, work: bool) -> Result<String, RpcError> {
        let params = json!({ "wallet": wallet, "key": key, "work": work });
        self.fetch_string("wallet_add", params, "account").await
    }

    /// Sum of balance and pending over all accounts in `wallet`.
    pub async fn wallet_balance_total(&self, wallet: &str) -> Result<StringMap, RpcError> {
        self.fetch_map("wallet_balance_total", json!({ "wallet": wallet }), "")
            .await
    }

    /// Balance and pending per account, for accounts with at least `threshold` raw when set.
    pub async fn wallet_balances(&self, wallet: &str, threshold: Option<&str>) -> Result<NestedStringMap, RpcError> {
        let mut params = json!({ "wallet": wallet });
        if let Some(threshold) = threshold {
            params["threshold"] = Value::from(threshold);
        }
        self.fetch_map_of_maps("wallet_balances", params, "balances").await
    }

    pub async fn wallet_change_seed(&self, wallet: &str, seed: &str) -> Result<bool, RpcError> {
        let params = json!({ "wallet": wallet, "seed": seed });
        self.is_success("wallet_change_seed", params, SuccessConvention::Presence)
            .await
    }

    pub async fn wallet_contains(&self, wallet: &str, account: &str) -> Result<bool, RpcError> {
        let params = json!({ "wallet": wallet, "account": account });
        self.is_success("wallet_contains", params, SuccessConvention::flag("exists"))
            .await
    }

    /// Creates a new wallet, returning its id.
    pub async fn wallet_create(&self) -> Result<String, RpcError> {
        self.fetch_string("wallet_create", Value::Null, "wallet").await
    }

    pub async fn wallet_destroy(&self, wallet: &str) -> Result<(), RpcError> {
        info!(wallet = wallet; "Destroying wallet");
        self.execute("wallet_destroy", json!({ "wallet": wallet })).await
    }

    /// Wallet contents as a JSON document.
    pub async fn wallet_export(&self, wallet: &str) -> Result<String, RpcError> {
        self.fetch_string("wallet_export", json!({ "wallet": wallet }), "json")
            .await
    }

    pub async fn wallet_frontiers(&self, wallet: &str) -> Result<StringMap, RpcError> {
        self.fetch_map("wallet_frontiers", json!({ "wallet": wallet }), "frontiers")
            .await
    }

    /// Pending blocks per account in `wallet`.
    pub async fn wallet_pending(
        &self,
        wallet: &str,
        count: u64,
        threshold: Option<&str>,
        source: bool,
    ) -> Result<JsonMap, RpcError> {
        let mut params = json!({ "wallet": wallet, "count": count, "source": source });
        if let Some(threshold) = threshold {
            params["threshold"] = Value::from(threshold);
        }
        self.fetch_map_interface("wallet_pending", params, "blocks").await
    }

    /// Rebroadcasts up to `count` blocks per account in `wallet`.
    pub async fn wallet_republish(&self, wallet: &str, count: u64) -> Result<Vec<String>, RpcError> {
        self.fetch_slice("wallet_republish", json!({ "wallet": wallet, "count": count }), "blocks")
            .await
    }

    /// Work value per account in `wallet`.
    pub async fn wallet_work_get(&self, wallet: &str) -> Result<StringMap, RpcError> {
        self.fetch_map("wallet_work_get", json!({ "wallet": wallet }), "works")
            .await
    }

    pub async fn password_change(&self, wallet: &str, password: &str) -> Result<bool, RpcError> {
        let params = json!({ "wallet": wallet, "password": password });
        self.is_success("password_change", params, SuccessConvention::flag("changed"))
            .await
    }

    pub async fn password_enter(&self, wallet: &str, password: &str) -> Result<bool, RpcError> {
        let params = json!({ "wallet": wallet, "password": password });
        self.is_success("password_enter", params, SuccessConvention::flag("valid"))
            .await
    }

    pub async fn password_valid(&self, wallet: &str) -> Result<bool, RpcError> {
        self.is_success(
            "password_valid",
            json!({ "wallet": wallet }),
            SuccessConvention::flag("valid"),
        )
        .await
    }

    pub async fn wallet_locked(&self, wallet: &str) -> Result<bool, RpcError> {
        self.is_success(
            "wallet_locked",
            json!({ "wallet": wallet }),
            SuccessConvention::flag("locked"),
        )
        .await
    }
}
