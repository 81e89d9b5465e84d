//! Shared HTTP plumbing for both API clients.

use crate::error::{ContentClientError, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Validate and normalize a base URL (http(s), no trailing slash).
pub(crate) fn normalize_base_url(raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(ContentClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = raw.trim().trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ContentClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    url::Url::parse(&url).map_err(|e| ContentClientError::InvalidUrl(e.to_string()))?;
    Ok(url)
}

/// HTTP client with reasonable defaults.
pub(crate) fn build_http(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(format!("Tilawah/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ContentClientError::Request)
}

/// GET `url` with query parameters and decode the JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T> {
    debug!(url = %url, "GET");

    let response = http.get(url).query(query).send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ContentClientError::Unreachable(e.to_string())
        } else {
            ContentClientError::Request(e)
        }
    })?;

    let status = response.status();

    if status.is_success() {
        response.json::<T>().await.map_err(|e| {
            ContentClientError::ParseError(format!("Failed to parse response from {}: {}", url, e))
        })
    } else if status == StatusCode::NOT_FOUND {
        Err(ContentClientError::NotFound(url.to_string()))
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(ContentClientError::Api {
            status: status.as_u16(),
            message: error_text,
        })
    }
}
