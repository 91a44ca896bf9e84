//! Typed wrappers for node actions.
//!
//! Each wrapper builds the action's parameters and decodes the response with
//! the strategy that matches the action's shape contract. They are methods on
//! [`NodeHttpClient`](crate::http::NodeHttpClient), grouped by subject.

mod accounts;
mod blocks;
mod node;
mod wallets;

pub use accounts::AccountBalance;
pub use blocks::BlockTemplate;
