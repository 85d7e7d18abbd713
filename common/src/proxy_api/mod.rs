//! The subset of the proxy management server's REST API that we use to block keys.

mod client;
mod config;
pub mod forms;

pub use client::{DataLimitSetter, ProxyApiClient};
pub use config::{ProxyServerConfig, DEFAULT_PROXY_CONFIG_PATH};
