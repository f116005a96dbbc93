use core::time::Duration;

use genesis_core::{Error, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Builds the HTTP client shared by the provider adapters.
///
/// # Errors
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Sends a prepared request and decodes a JSON body from a 2xx response.
///
/// # Errors
/// Returns an error on transport failure, a non-success status, or an undecodable body.
pub async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    service: &str,
) -> Result<T> {
    let response = request.send().await.map_err(|err| {
        debug!(service, %err, "request failed");
        Error::Provider(format!("{service} API request failed: {err}"))
    })?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_owned());
        debug!(service, %status, "request rejected");
        return Err(Error::Provider(format!(
            "{service} API error {status}: {error_text}"
        )));
    }

    response
        .json()
        .await
        .map_err(|err| Error::InvalidResponse(format!("Failed to parse {service} response: {err}")))
}

/// Trims a trailing slash so paths can be appended verbatim.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}
