//! The `common` crate holds the pieces shared by the expiration API and the expiration enforcer:
//! the [`ExpirationTable`] and its storage, the proxy management API client and the
//! tracing, time and HTTP client plumbing both binaries use.
//!
//! [`ExpirationTable`]: expirations::ExpirationTable

pub mod clients;
mod error;
pub mod expirations;
pub mod healthcheck;
pub mod proxy_api;
pub mod time;
pub mod tracing;

pub use error::Error;
