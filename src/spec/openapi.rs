// src/spec/openapi.rs

use reqwest::blocking::Client;
use serde_json::{Error as JsonError, Value};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] JsonError),

    #[error("Specification is missing required field `{0}`")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, SpecError>;

/// A fetched OpenAPI specification.
///
/// The document is kept as a raw JSON Value; beyond `info.title` and `servers`
/// its body is opaque to this crate and is embedded verbatim into prompts.
#[derive(Debug, Clone)]
pub struct OpenApiSpec {
    /// The raw JSON Value of the decoded specification
    pub raw_spec: Value,
}

impl OpenApiSpec {
    pub fn from_value(raw_spec: Value) -> Self {
        OpenApiSpec { raw_spec }
    }

    /// The specification title. The diagram's identity depends on it, so a
    /// document without one is rejected rather than given a default.
    pub fn title(&self) -> Result<&str> {
        self.raw_spec
            .get("info")
            .and_then(|info| info.get("title"))
            .and_then(Value::as_str)
            .ok_or(SpecError::MissingField("info.title"))
    }

    /// The declared server descriptors, in order. Empty when absent.
    pub fn servers(&self) -> Vec<Value> {
        self.raw_spec
            .get("servers")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// The first declared server's url, if any
    pub fn target_server(&self) -> Option<String> {
        self.raw_spec
            .get("servers")
            .and_then(Value::as_array)
            .and_then(|servers| servers.get(0))
            .and_then(|server| server.get("url"))
            .and_then(Value::as_str)
            .map(String::from)
    }
}

/// Fetch and decode an OpenAPI specification from a URL.
///
/// A non-success status is logged and yields `Ok(None)`; callers must treat an
/// absent specification as a hard stop. Transport failures and undecodable
/// bodies propagate as errors.
pub fn fetch_spec(client: &Client, url: &str) -> Result<Option<OpenApiSpec>> {
    let response = client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        error!("Failed to fetch OpenAPI spec. Status code: {}", status);
        return Ok(None);
    }

    let raw_spec: Value = serde_json::from_str(&response.text()?)?;
    Ok(Some(OpenApiSpec { raw_spec }))
}
