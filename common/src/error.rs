use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    IO(#[from] io::Error),
    #[error("Error while serializing JSON")]
    JsonSerialization(#[from] serde_json::Error),
    #[error("Failed to persist expirations file: {0}")]
    Persist(#[from] tempfile::PersistError),
    #[error("Proxy server config not found at {0}")]
    ProxyConfigNotFound(PathBuf),
    #[error("Proxy server config has no apiUrl field")]
    MissingApiUrl,
    #[error("Proxy server apiUrl is not a valid base URL: {0}")]
    InvalidApiUrl(String),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {0}: {1}")]
    Api(reqwest::StatusCode, String),
}
