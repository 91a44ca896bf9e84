pub mod actions;
pub mod config;
pub mod http;
pub mod log;
pub mod units;

pub use crate::config::ClientConfig;
pub use crate::http::{NodeHttpClient, RpcError};
pub use crate::units::{Amount, Denomination, UnitError, convert};
