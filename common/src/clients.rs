//! A module containing utility functions to build `reqwest` clients and handle their responses

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use crate::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds a client which does not verify the server's TLS certificate.
///
/// Only use this for servers which are known to present a self-signed certificate,
/// such as the proxy management API.
pub fn new_insecure_reqwest_client() -> Result<Client, Error> {
    // We set the max number of allowed idle connections to 0 to avoid
    // a race condition where a connection is selected from the pool and
    // written to at the same time the server is closing it.
    // More details here:
    // https://github.com/hyperium/hyper/issues/2136#issuecomment-589345238
    let client = Client::builder()
        .pool_max_idle_per_host(0)
        .timeout(REQUEST_TIMEOUT)
        .danger_accept_invalid_certs(true)
        .build()?;

    Ok(client)
}

async fn handle_error<T>(resp: Response) -> Result<T, Error> {
    let status = resp.status();
    let error_text = resp.text().await.unwrap_or_default();
    Err(Error::Api(status, error_text))
}

/// Succeeds only if the server answered with exactly `expected`, any other status
/// (including other 2xx codes) is turned into an [`Error::Api`]
pub async fn handle_response_status(resp: Response, expected: StatusCode) -> Result<(), Error> {
    if resp.status() == expected {
        Ok(())
    } else {
        handle_error(resp).await
    }
}
