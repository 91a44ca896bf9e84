//! HTTP client module for Nano node RPC communication.
//!
//! Every node action is a single HTTP POST whose JSON body names the action
//! and carries its parameters. Responses are JSON objects whose shapes differ
//! from action to action, so decoding is done by a small set of strategies
//! that each trust the shape the caller declares.
//!
//! # Architecture
//!
//! - [`NodeHttpClient`] - calls an action and decodes the response
//! - [`decode`] - the decoding strategies as pure functions over response bodies
//! - [`RpcError`] - error type for transport and decoding failures
//! - [`ListField`], [`SuccessConvention`] - the two places where a node
//!   encodes the same information in more than one way
//!
//! # Error Handling
//!
//! Nodes report application errors with a JSON `"error"` field in a normal
//! response, not through HTTP status codes. Those are surfaced as
//! [`RpcError::Node`]. Network failures are [`RpcError::Transport`] or
//! [`RpcError::Middleware`] and are not retried unless the client was
//! configured with retries.

pub mod decode;
mod error;
mod http_client;
mod node_http_client;
mod types;

pub use error::RpcError;
pub use node_http_client::NodeHttpClient;
pub use types::{ActionRequest, JsonMap, ListField, NestedStringMap, StringMap, SuccessConvention};
