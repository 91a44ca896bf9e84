use log::debug;
use serde_json::{Value, json};

use super::accounts::history_entries;
use crate::http::{JsonMap, NestedStringMap, NodeHttpClient, RpcError, StringMap, SuccessConvention};

/// Parameters of a `block_create` request.
///
/// Each variant carries exactly the fields the node expects for that block type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockTemplate<'a> {
    Open {
        key: &'a str,
        account: &'a str,
        representative: &'a str,
        source: &'a str,
    },
    Receive {
        wallet: &'a str,
        account: &'a str,
        source: &'a str,
        previous: &'a str,
    },
    Send {
        wallet: &'a str,
        account: &'a str,
        destination: &'a str,
        balance: &'a str,
        amount: &'a str,
        previous: &'a str,
    },
    Change {
        wallet: &'a str,
        account: &'a str,
        representative: &'a str,
        previous: &'a str,
    },
}

impl BlockTemplate<'_> {
    fn params(&self) -> Value {
        match *self {
            BlockTemplate::Open {
                key,
                account,
                representative,
                source,
            } => json!({
                "type": "open",
                "key": key,
                "account": account,
                "representative": representative,
                "source": source,
            }),
            BlockTemplate::Receive {
                wallet,
                account,
                source,
                previous,
            } => json!({
                "type": "receive",
                "wallet": wallet,
                "account": account,
                "source": source,
                "previous": previous,
            }),
            BlockTemplate::Send {
                wallet,
                account,
                destination,
                balance,
                amount,
                previous,
            } => json!({
                "type": "send",
                "wallet": wallet,
                "account": account,
                "destination": destination,
                "balance": balance,
                "amount": amount,
                "previous": previous,
            }),
            BlockTemplate::Change {
                wallet,
                account,
                representative,
                previous,
            } => json!({
                "type": "change",
                "wallet": wallet,
                "account": account,
                "representative": representative,
                "previous": previous,
            }),
        }
    }
}

impl NodeHttpClient {
    /// Contents of the block with `hash`.
    pub async fn block(&self, hash: &str) -> Result<StringMap, RpcError> {
        self.fetch_map("block", json!({ "hash": hash }), "contents").await
    }

    pub async fn blocks(&self, hashes: &[&str]) -> Result<NestedStringMap, RpcError> {
        self.fetch_map_of_maps("blocks", json!({ "hashes": hashes }), "blocks")
            .await
    }

    /// Blocks with their account, amount and contents.
    pub async fn blocks_info(&self, hashes: &[&str], pending: bool, source: bool) -> Result<JsonMap, RpcError> {
        let params = json!({ "hashes": hashes, "pending": pending, "source": source });
        self.fetch_map_interface("blocks_info", params, "blocks").await
    }

    pub async fn block_account(&self, hash: &str) -> Result<String, RpcError> {
        self.fetch_string("block_account", json!({ "hash": hash }), "account")
            .await
    }

    /// Checked and unchecked block counts.
    pub async fn block_count(&self) -> Result<StringMap, RpcError> {
        self.fetch_map("block_count", Value::Null, "").await
    }

    /// Block counts per block type.
    pub async fn block_count_type(&self) -> Result<StringMap, RpcError> {
        self.fetch_map("block_count_type", Value::Null, "").await
    }

    /// Creates a block without publishing it.
    ///
    /// The response carries the block `hash` and its JSON encoded `block`.
    /// `work` is only sent when non-empty.
    pub async fn block_create(&self, template: &BlockTemplate<'_>, work: &str) -> Result<StringMap, RpcError> {
        let mut params = template.params();
        if !work.is_empty() {
            params["work"] = Value::from(work);
        }
        self.fetch_map("block_create", params, "").await
    }

    /// Publishes a JSON encoded block, returning its hash.
    pub async fn process(&self, block: &str) -> Result<String, RpcError> {
        debug!(length = block.len(); "Publishing block");
        self.fetch_string("process", json!({ "block": block }), "hash").await
    }

    pub async fn pending_exists(&self, hash: &str) -> Result<bool, RpcError> {
        self.is_success("pending_exists", json!({ "hash": hash }), SuccessConvention::flag("exists"))
            .await
    }

    /// JSON contents of an unchecked block.
    pub async fn unchecked_get(&self, hash: &str) -> Result<String, RpcError> {
        self.fetch_string("unchecked_get", json!({ "hash": hash }), "contents")
            .await
    }

    /// Stops generating work for `hash`.
    pub async fn work_cancel(&self, hash: &str) -> Result<(), RpcError> {
        self.execute("work_cancel", json!({ "hash": hash })).await
    }

    pub async fn work_generate(&self, hash: &str) -> Result<String, RpcError> {
        self.fetch_string("work_generate", json!({ "hash": hash }), "work").await
    }

    pub async fn work_validate(&self, work: &str, hash: &str) -> Result<bool, RpcError> {
        self.is_success(
            "work_validate",
            json!({ "work": work, "hash": hash }),
            SuccessConvention::flag("valid"),
        )
        .await
    }

    /// Up to `count` hashes following `block` on its account chain.
    pub async fn successors(&self, block: &str, count: u64) -> Result<Vec<String>, RpcError> {
        self.fetch_slice("successors", json!({ "block": block, "count": count }), "blocks")
            .await
    }

    /// Up to `count` hashes preceding `block` on its account chain.
    pub async fn chain(&self, block: &str, count: u64) -> Result<Vec<String>, RpcError> {
        self.fetch_slice("chain", json!({ "block": block, "count": count }), "blocks")
            .await
    }

    pub async fn history(&self, hash: &str, count: u64) -> Result<Vec<StringMap>, RpcError> {
        let value = self
            .fetch_value("history", json!({ "hash": hash, "count": count }), "history")
            .await?;
        history_entries("history", value)
    }
}
