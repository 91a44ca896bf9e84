//! Error types for node RPC operations.
//!
//! This module defines the [`RpcError`] enum which encompasses all possible
//! failure modes when calling a node action and decoding its response.

use thiserror::Error;

/// Errors that can occur while calling a node action or decoding its response.
///
/// The node reports its own failures inside a successful HTTP response, so the
/// variants below describe what went wrong while interpreting the body rather
/// than HTTP status codes.
///
/// # Error Categories
///
/// - **Network errors**: [`Transport`](RpcError::Transport),
///   [`Middleware`](RpcError::Middleware)
/// - **Request errors**: [`Serialize`](RpcError::Serialize)
/// - **Decoding errors**: [`Shape`](RpcError::Shape),
///   [`MissingKey`](RpcError::MissingKey), [`Type`](RpcError::Type),
///   [`Parse`](RpcError::Parse)
/// - **Node errors**: [`Node`](RpcError::Node)
///
/// # Example
///
/// ```rust,no_run
/// use nano_rpc::http::RpcError;
///
/// fn handle_error(err: RpcError) {
///     match err {
///         RpcError::Node { action, message } => {
///             eprintln!("{} was rejected by the node: {}", action, message);
///         }
///         RpcError::Transport(e) => {
///             eprintln!("Network error: {}", e);
///         }
///         _ => eprintln!("Other error: {}", err),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum RpcError {
    /// The HTTP request failed due to a network or connection error.
    ///
    /// This typically indicates connectivity issues such as:
    /// - Connection refused (node not running)
    /// - Connection timeout
    /// - DNS resolution failure
    /// - The response body could not be read
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// An error occurred in the HTTP middleware layer.
    ///
    /// Connection failures surface here when the request is sent through the
    /// middleware stack.
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// The request parameters could not be encoded as a JSON object.
    #[error("Could not serialize request for {action}: {reason}")]
    Serialize { action: String, reason: String },

    /// The response did not parse into the nesting the caller declared.
    #[error("Response of {action} has an unexpected shape: {source}")]
    Shape {
        action: String,
        #[source]
        source: serde_json::Error,
    },

    /// The declared key is absent from an otherwise well-shaped response.
    #[error("Response of {action} doesn't contain key {key}")]
    MissingKey { action: String, key: String },

    /// A list-typed field held something that is not a list of strings.
    #[error("Key {key} in response of {action} contains {found} instead of a list of strings")]
    Type { action: String, key: String, found: String },

    /// A numeric field did not contain a base-10 integer.
    #[error("Key {key} in response of {action} is not an integer: {value:?}")]
    Parse { action: String, key: String, value: String },

    /// The node answered with an `"error"` field instead of the expected data.
    #[error("Node rejected {action}: {message}")]
    Node { action: String, message: String },
}

impl RpcError {
    /// Returns `true` for failures that happened before a response body was available.
    pub fn is_transport(&self) -> bool {
        matches!(self, RpcError::Transport(_) | RpcError::Middleware(_))
    }
}
