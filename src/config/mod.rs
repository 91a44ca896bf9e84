mod loader;

use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

pub use loader::{get_default_config, load_configuration, write_config_to};

/// Default node RPC endpoint.
pub const DEFAULT_NODE_URL: &str = "http://localhost:7076";

/// Default timeout for a single call (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Calls are not retried unless configured.
pub const DEFAULT_MAX_RETRIES: u32 = 0;

/// Settings for a [`NodeHttpClient`](crate::http::NodeHttpClient).
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use url::Url;
/// use nano_rpc::config::ClientConfig;
///
/// let config = ClientConfig {
///     url: Url::parse("http://10.0.0.2:7076").unwrap(),
///     timeout: Duration::from_secs(5),
///     ..ClientConfig::default()
/// };
/// assert_eq!(config.max_retries, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Node RPC endpoint every action is posted to.
    pub url: Url,
    /// Maximum duration to wait for a response.
    pub timeout: Duration,
    /// Retry attempts for transient transport failures. 0 disables retries.
    pub max_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_NODE_URL).expect("default node url is valid"),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl ClientConfig {
    /// Reads the `node.*` section, falling back to defaults for absent keys.
    pub fn from_config(cfg: &config::Config) -> Result<Self> {
        let defaults = Self::default();

        let url = match cfg.get_string("node.url") {
            Ok(url) => Url::parse(&url).with_context(|| format!("Invalid node url {url}"))?,
            Err(config::ConfigError::NotFound(_)) => defaults.url,
            Err(e) => return Err(e).context("Could not get node url"),
        };

        let timeout = match cfg.get_int("node.timeout_secs") {
            Ok(secs) => Duration::from_secs(u64::try_from(secs).context("node.timeout_secs must not be negative")?),
            Err(config::ConfigError::NotFound(_)) => defaults.timeout,
            Err(e) => return Err(e).context("Could not get node timeout"),
        };

        let max_retries = match cfg.get_int("node.max_retries") {
            Ok(n) => u32::try_from(n).context("node.max_retries out of range")?,
            Err(config::ConfigError::NotFound(_)) => defaults.max_retries,
            Err(e) => return Err(e).context("Could not get node max retries"),
        };

        Ok(Self {
            url,
            timeout,
            max_retries,
        })
    }
}
