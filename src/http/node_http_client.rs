//! Client for calling node actions and decoding their responses.
//!
//! This module provides the [`NodeHttpClient`] struct, the surface every
//! action wrapper is built on. Each method performs one call and interprets
//! the response under a declared shape contract, see [`super::decode`].
//!
//! # Example
//!
//! ```rust,no_run
//! use nano_rpc::config::ClientConfig;
//! use nano_rpc::http::NodeHttpClient;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let client = NodeHttpClient::new(&ClientConfig::default())?;
//!
//! let count = client
//!     .fetch_map("block_count", serde_json::Value::Null, "")
//!     .await?;
//! println!("Node has {} blocks", count["count"]);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use serde_json::Value;

use super::decode;
use super::error::RpcError;
use super::http_client::HttpClient;
use super::types::{JsonMap, NestedStringMap, StringMap, SuccessConvention};
use crate::config::ClientConfig;

/// HTTP client for a single node endpoint.
///
/// The endpoint is fixed at construction. To talk to another node, build
/// another client.
///
/// # Thread Safety
///
/// `NodeHttpClient` holds no per-call state and can be shared across tasks.
pub struct NodeHttpClient {
    http_client: HttpClient,
}

impl NodeHttpClient {
    /// Creates a client for the endpoint in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized (e.g.,
    /// TLS backend initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, RpcError> {
        let http_client = HttpClient::new(config)?;
        Ok(Self { http_client })
    }

    /// Returns the node address as a string.
    pub fn get_address(&self) -> String {
        self.http_client.url().to_string()
    }

    /// Returns the round-trip time of the most recent call, if any.
    pub async fn get_last_request_latency(&self) -> Option<Duration> {
        self.http_client.get_latency().await
    }

    /// Performs the call and returns the undecoded response body.
    pub async fn call(&self, action: &str, params: Value) -> Result<Vec<u8>, RpcError> {
        self.http_client.call(action, params).await
    }

    /// Performs the call and only checks that the node did not report an error.
    pub async fn execute(&self, action: &str, params: Value) -> Result<(), RpcError> {
        let raw = self.call(action, params).await?;
        decode::object(action, &raw)?;
        Ok(())
    }

    /// Flat string map: the whole response when `key` is empty, else the object under `key`.
    pub async fn fetch_map(&self, action: &str, params: Value, key: &str) -> Result<StringMap, RpcError> {
        let raw = self.call(action, params).await?;
        decode::string_map(action, &raw, key)
    }

    /// Like [`fetch_map`](Self::fetch_map), but values may be any JSON.
    pub async fn fetch_map_interface(&self, action: &str, params: Value, key: &str) -> Result<JsonMap, RpcError> {
        let raw = self.call(action, params).await?;
        decode::json_map(action, &raw, key)
    }

    /// Map of flat string maps, the whole response when `key` is empty, else under `key`.
    pub async fn fetch_map_of_maps(
        &self,
        action: &str,
        params: Value,
        key: &str,
    ) -> Result<NestedStringMap, RpcError> {
        let raw = self.call(action, params).await?;
        decode::nested_string_map(action, &raw, key)
    }

    pub async fn fetch_string(&self, action: &str, params: Value, key: &str) -> Result<String, RpcError> {
        let raw = self.call(action, params).await?;
        decode::string(action, &raw, key)
    }

    pub async fn fetch_int(&self, action: &str, params: Value, key: &str) -> Result<i64, RpcError> {
        let raw = self.call(action, params).await?;
        decode::int(action, &raw, key)
    }

    /// Evaluates the action's success flag under `convention`.
    pub async fn is_success(
        &self,
        action: &str,
        params: Value,
        convention: SuccessConvention,
    ) -> Result<bool, RpcError> {
        let raw = self.call(action, params).await?;
        decode::success(action, &raw, &convention)
    }

    pub async fn fetch_value(&self, action: &str, params: Value, key: &str) -> Result<Value, RpcError> {
        let raw = self.call(action, params).await?;
        decode::value(action, &raw, key)
    }

    /// List of strings under `key`. An empty string in place of the list means no entries.
    pub async fn fetch_slice(&self, action: &str, params: Value, key: &str) -> Result<Vec<String>, RpcError> {
        let raw = self.call(action, params).await?;
        decode::string_list(action, &raw, key)
    }
}
