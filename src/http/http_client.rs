use std::time::{Duration, Instant};

use log::debug;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tokio::sync::RwLock;
use url::Url;

use super::error::RpcError;
use super::types::ActionRequest;
use crate::config::ClientConfig;

/// Transport for node actions: one JSON POST per call, raw body back.
pub(crate) struct HttpClient {
    url: Url,
    client: reqwest_middleware::ClientWithMiddleware,
    last_latency: RwLock<Option<(Duration, Instant)>>,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, RpcError> {
        let retry_policy =
            reqwest_retry::policies::ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

        let inner_client = reqwest::Client::builder().timeout(config.timeout).build()?;

        let client = reqwest_middleware::ClientBuilder::new(inner_client)
            .with(reqwest_retry::RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            url: config.url.clone(),
            client,
            last_latency: RwLock::new(None),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Posts `{"action": action, ...params}` and returns the response body.
    ///
    /// The HTTP status is not interpreted; nodes report failures in the body.
    pub async fn call(&self, action: &str, params: Value) -> Result<Vec<u8>, RpcError> {
        let request = ActionRequest::new(action, params)?;
        let body = serde_json::to_vec(&request.into_body()).map_err(|e| RpcError::Serialize {
            action: action.to_string(),
            reason: e.to_string(),
        })?;

        let start = Instant::now();
        let resp = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        let latency = start.elapsed();
        self.update_latency(latency).await;

        debug!(
            action = action,
            status = status.as_u16(),
            latency_ms = millis(latency);
            "RPC: Call completed"
        );

        Ok(bytes.to_vec())
    }

    async fn update_latency(&self, duration: Duration) {
        *self.last_latency.write().await = Some((duration, Instant::now()));
    }

    pub async fn get_latency(&self) -> Option<Duration> {
        self.last_latency.read().await.map(|(d, _)| d)
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(uri: &str) -> ClientConfig {
        ClientConfig {
            url: Url::parse(uri).unwrap(),
            ..ClientConfig::default()
        }
    }

    #[tokio::test]
    async fn test_call_posts_action_in_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({ "action": "block_count" })))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"count":"1000","unchecked":"10"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(&config_for(&mock_server.uri())).unwrap();
        let raw = client.call("block_count", Value::Null).await.unwrap();

        assert_eq!(raw, br#"{"count":"1000","unchecked":"10"}"#.to_vec());
        assert!(client.get_latency().await.is_some());
    }

    #[tokio::test]
    async fn test_call_returns_body_regardless_of_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"error":"Unknown command"}"#))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(&config_for(&mock_server.uri())).unwrap();
        let raw = client.call("bogus", json!({})).await.unwrap();

        assert_eq!(raw, br#"{"error":"Unknown command"}"#.to_vec());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        drop(mock_server);

        let client = HttpClient::new(&config_for(&uri)).unwrap();
        let err = client.call("block_count", Value::Null).await.unwrap_err();

        assert!(err.is_transport(), "unexpected error: {err}");
        assert!(client.get_latency().await.is_none());
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_micros(1_500)), 1);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
