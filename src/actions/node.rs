use serde_json::{Value, json};

use crate::http::{JsonMap, NodeHttpClient, RpcError, StringMap, SuccessConvention};

impl NodeHttpClient {
    /// Deterministic keypair derived from `seed` at `index`.
    pub async fn deterministic_key(&self, seed: &str, index: u32) -> Result<StringMap, RpcError> {
        self.fetch_map("deterministic_key", json!({ "seed": seed, "index": index }), "")
            .await
    }

    /// Random keypair with `private`, `public` and `account` fields.
    pub async fn key_create(&self) -> Result<StringMap, RpcError> {
        self.fetch_map("key_create", Value::Null, "").await
    }

    /// Public key and account for a private key.
    pub async fn key_expand(&self, key: &str) -> Result<StringMap, RpcError> {
        self.fetch_map("key_expand", json!({ "key": key }), "").await
    }

    /// Unchecked database keys and their blocks, starting at `key`.
    pub async fn unchecked_keys(&self, key: &str, count: u64) -> Result<JsonMap, RpcError> {
        self.fetch_map_interface("unchecked_keys", json!({ "key": key, "count": count }), "unchecked")
            .await
    }

    /// Up to `count` unchecked blocks, keyed by hash.
    pub async fn unchecked(&self, count: u64) -> Result<StringMap, RpcError> {
        self.fetch_map("unchecked", json!({ "count": count }), "blocks").await
    }

    pub async fn unchecked_clear(&self) -> Result<bool, RpcError> {
        self.is_success("unchecked_clear", Value::Null, SuccessConvention::Presence)
            .await
    }

    /// Raw amount in the public supply.
    pub async fn available_supply(&self) -> Result<String, RpcError> {
        self.fetch_string("available_supply", Value::Null, "available").await
    }

    pub async fn frontier_count(&self) -> Result<i64, RpcError> {
        self.fetch_int("frontier_count", Value::Null, "count").await
    }

    /// RPC, store and node versions.
    pub async fn version(&self) -> Result<StringMap, RpcError> {
        self.fetch_map("version", Value::Null, "").await
    }

    /// Connected peers and their protocol versions.
    pub async fn peers(&self) -> Result<StringMap, RpcError> {
        self.fetch_map("peers", Value::Null, "peers").await
    }

    /// Representatives and their voting weight, optionally limited to `count` and sorted.
    pub async fn representatives(&self, count: Option<u64>, sorting: bool) -> Result<StringMap, RpcError> {
        let mut params = json!({ "sorting": sorting });
        if let Some(count) = count {
            params["count"] = Value::from(count);
        }
        self.fetch_map("representatives", params, "representatives").await
    }

    pub async fn receive_minimum(&self) -> Result<String, RpcError> {
        self.fetch_string("receive_minimum", Value::Null, "amount").await
    }

    pub async fn receive_minimum_set(&self, amount: &str) -> Result<bool, RpcError> {
        self.is_success(
            "receive_minimum_set",
            json!({ "amount": amount }),
            SuccessConvention::Presence,
        )
        .await
    }

    /// Starts bootstrapping from the peer at `address:port`.
    pub async fn bootstrap(&self, address: &str, port: u16) -> Result<bool, RpcError> {
        let params = json!({ "address": address, "port": port });
        self.is_success("bootstrap", params, SuccessConvention::Presence).await
    }

    /// Starts multi-connection bootstrap to random peers.
    pub async fn bootstrap_any(&self) -> Result<bool, RpcError> {
        self.is_success("bootstrap_any", Value::Null, SuccessConvention::Presence)
            .await
    }

    pub async fn keepalive(&self, address: &str, port: u16) -> Result<(), RpcError> {
        self.execute("keepalive", json!({ "address": address, "port": port }))
            .await
    }

    /// Searches pending blocks for every unlocked wallet.
    pub async fn search_pending_all(&self) -> Result<bool, RpcError> {
        self.is_success("search_pending_all", Value::Null, SuccessConvention::Presence)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use url::Url;
    use wiremock::matchers::{body_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

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
    async fn test_key_create() {
        let (_server, client) = mock_node(
            json!({ "action": "key_create" }),
            json!({
                "private": "781186FB9EF17DB6E3D1056550D9FAE5D5BBADA6A6BC370E4CBB938B1DC71DA3",
                "public": "3068BB1CA04525BB0E416C485FE6A67FD52540227D267CC8B6E8DA958A7FA039",
                "account": "xrb_1e5aqegc1jb7qe964u4adzmcezyo6o146zb8hm6dft8tkp79za3sxwjym5rx"
            }),
        )
        .await;

        let keypair = client.key_create().await.unwrap();
        assert_eq!(
            keypair["account"],
            "xrb_1e5aqegc1jb7qe964u4adzmcezyo6o146zb8hm6dft8tkp79za3sxwjym5rx"
        );
    }

    #[tokio::test]
    async fn test_deterministic_key() {
        let (_server, client) = mock_node(
            json!({ "action": "deterministic_key", "seed": "0000", "index": 0 }),
            json!({ "private": "9F0E", "public": "C008", "account": "xrb_3i1a" }),
        )
        .await;

        let keypair = client.deterministic_key("0000", 0).await.unwrap();
        assert_eq!(keypair["public"], "C008");
    }

    #[tokio::test]
    async fn test_representatives_without_count() {
        let (_server, client) = mock_node(
            json!({ "action": "representatives", "sorting": true }),
            json!({ "representatives": { "xrb_1": "3822372327060170000000000000000000000" } }),
        )
        .await;

        let reps = client.representatives(None, true).await.unwrap();
        assert_eq!(reps.len(), 1);
    }

    #[tokio::test]
    async fn test_frontier_count() {
        let (_server, client) = mock_node(json!({ "action": "frontier_count" }), json!({ "count": "920471" })).await;

        assert_eq!(client.frontier_count().await.unwrap(), 920471);
    }

    #[tokio::test]
    async fn test_unchecked_keys() {
        let (_server, client) = mock_node(
            json!({ "action": "unchecked_keys", "key": "19BF", "count": 1 }),
            json!({
                "unchecked": {
                    "19BF": { "hash": "7916", "contents": { "type": "open" } }
                }
            }),
        )
        .await;

        let unchecked = client.unchecked_keys("19BF", 1).await.unwrap();
        assert_eq!(unchecked["19BF"]["contents"]["type"], json!("open"));
    }

    #[tokio::test]
    async fn test_bootstrap_success() {
        let (_server, client) = mock_node(
            json!({ "action": "bootstrap", "address": "::ffff:138.201.94.249", "port": 7075 }),
            json!({ "success": "" }),
        )
        .await;

        assert!(client.bootstrap("::ffff:138.201.94.249", 7075).await.unwrap());
    }
}
