use std::{
    io,
    path::{Path, PathBuf},
};

use reqwest::Url;
use serde::Deserialize;

use crate::Error;

/// Where the proxy management server keeps its own config, which includes the API URL
pub const DEFAULT_PROXY_CONFIG_PATH: &str =
    "/opt/outline/persisted-state/shadowbox_server_config.json";

// Only the fields we need, the server writes plenty of others
#[derive(Deserialize)]
struct RawProxyServerConfig {
    #[serde(rename = "apiUrl")]
    api_url: Option<String>,
}

/// Connection details for the proxy management API, read from the proxy server's config file.
#[derive(Clone, Debug)]
pub struct ProxyServerConfig {
    pub api_url: Url,
}

impl ProxyServerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::ProxyConfigNotFound(PathBuf::from(path)),
            _ => Error::IO(e),
        })?;

        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, Error> {
        let raw: RawProxyServerConfig = serde_json::from_str(contents)?;
        let api_url = raw.api_url.ok_or(Error::MissingApiUrl)?;

        let parsed = Url::parse(&api_url).map_err(|_| Error::InvalidApiUrl(api_url.clone()))?;
        if parsed.cannot_be_a_base() {
            return Err(Error::InvalidApiUrl(api_url));
        }

        Ok(Self { api_url: parsed })
    }

    /// The API URL without its path, which is a secret access prefix and should not be logged
    pub fn redacted_api_url(&self) -> String {
        self.api_url.origin().ascii_serialization()
    }
}
