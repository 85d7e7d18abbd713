use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use crate::{
    clients::{handle_response_status, new_insecure_reqwest_client},
    expirations::KeyId,
    Error,
};

use super::forms::PutDataLimitForm;

/// Something which can cap how much data an access key is allowed to transfer.
#[async_trait]
pub trait DataLimitSetter: Send + Sync {
    async fn set_data_limit(&self, key_id: &KeyId, bytes: u64) -> Result<(), Error>;
}

/// Client for the proxy server's management API.
///
/// The management API is served with a self-signed certificate so certificate
/// verification is disabled for this client.
#[derive(Clone)]
pub struct ProxyApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ProxyApiClient {
    pub fn new(base_url: Url) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidApiUrl(base_url.into()));
        }

        let client = new_insecure_reqwest_client()?;
        Ok(Self { client, base_url })
    }

    fn data_limit_url(&self, key_id: &KeyId) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidApiUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("access-keys")
            .push(key_id)
            .push("data-limit");

        Ok(url)
    }
}

#[async_trait]
impl DataLimitSetter for ProxyApiClient {
    async fn set_data_limit(&self, key_id: &KeyId, bytes: u64) -> Result<(), Error> {
        let url = self.data_limit_url(key_id)?;
        let form = PutDataLimitForm::new(bytes);

        let resp = self.client.put(url).json(&form).send().await?;

        handle_response_status(resp, StatusCode::NO_CONTENT).await
    }
}
