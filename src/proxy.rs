// src/proxy.rs

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("The specification declares no target server to proxy against")]
    NoTargetServer,

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ProxyError>;

/// Reconstruct the real outbound URL from a diagram-shaped path.
///
/// The diagram pipeline appends an artificial trailing slash to every path so
/// the grammar renders; strip it back off, but only when it is actually there,
/// so a caller supplying the original OpenAPI path loses nothing.
pub fn build_target_url(server: &str, path: &str) -> String {
    let path = path.strip_suffix('/').unwrap_or(path);
    format!("{}{}", server, path)
}

/// Issue the proxied request against the target server.
///
/// Returns the decoded JSON body on success, `None` when the upstream
/// rejected the call with a non-success status, and an error when the
/// upstream could not be reached at all.
pub fn send_request(
    client: &Client,
    server: &str,
    path: &str,
    method: &str,
    body: &str,
) -> Result<Option<Value>> {
    let method = Method::from_bytes(method.to_uppercase().as_bytes())
        .map_err(|_| ProxyError::InvalidMethod(method.to_string()))?;

    let url = build_target_url(server, path);

    let response = client
        .request(method, &url)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .body(body.to_string())
        .send()?;

    let status = response.status();
    if !status.is_success() {
        warn!("Failed to perform request against {}: {}", url, status);
        return Ok(None);
    }

    Ok(Some(response.json()?))
}
