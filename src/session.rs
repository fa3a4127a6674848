// src/session.rs

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;

use crate::diagram;
use crate::provider::{self, TextGenerator};
use crate::proxy::{self, ProxyError};
use crate::spec::{fetch_spec, OpenApiSpec};
use crate::{AppError, Result};

const REQUEST_BODY_PROMPT: &str = "\
You are a system that generates suggested request bodies from an OpenAPI specification and a desired HTTP verb.

The target endpoint is '{path}' and the desired verb is '{method}'.
Fill the values of the body with information that makes sense given the specification, the field names, the endpoint name and the expected output.
Include every key, using a placeholder value whenever you are not sure about the real one.

This is the specification:
{spec}

What should be the request body for this request?
Return only the minified JSON body, with no other information and no formatting.
";

/// The interpretation of a specification, as served to the rendering consumer
#[derive(Debug, Clone, Serialize)]
pub struct SpecOverview {
    pub title: String,
    pub diagram: String,
    pub server: Vec<Value>,
    pub spec: Value,
}

/// A synthesized example body for an endpoint+verb pair.
///
/// `suggest_body` is the provider text verbatim; it is expected to be minified
/// JSON but is not parsed or validated here.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestedRequest {
    pub suggest_body: String,
    pub path: String,
    pub method: String,
}

/// Process-scoped session state: the fetched specification, the server
/// targets derived from it, and the generation backend.
///
/// Constructed once at startup and threaded through every operation;
/// everything here is read-only after construction, so concurrent reads
/// are safe without locking.
pub struct Session {
    spec: OpenApiSpec,
    servers: Vec<Value>,
    target_server: Option<String>,
    generator: Box<dyn TextGenerator>,
    client: Client,
}

impl Session {
    /// Fetch the specification and assemble a session around it.
    ///
    /// An absent specification (non-success fetch status) is fatal: every
    /// downstream prompt embeds the spec verbatim, so there is nothing to do
    /// without one.
    pub fn initialize(provider_kind: &str, api_key: &str, spec_url: &str) -> Result<Self> {
        let generator = provider::create_generator(provider_kind, api_key)?;
        let client = Client::new();

        let spec = fetch_spec(&client, spec_url)?
            .ok_or_else(|| AppError::MissingSpec(spec_url.to_string()))?;

        Ok(Self::with_generator(spec, generator))
    }

    pub fn with_generator(spec: OpenApiSpec, generator: Box<dyn TextGenerator>) -> Self {
        let servers = spec.servers();
        let target_server = spec.target_server();

        Session {
            spec,
            servers,
            target_server,
            generator,
            client: Client::new(),
        }
    }

    pub fn servers(&self) -> &[Value] {
        &self.servers
    }

    pub fn target_server(&self) -> Option<&str> {
        self.target_server.as_deref()
    }

    /// Interpret the specification into a role/endpoint diagram.
    ///
    /// The provider's answer is normalized by the deterministic repair pass,
    /// so an omitted header or stray braces never produce an unusable diagram.
    pub fn interpret(&self) -> Result<SpecOverview> {
        let title = self.spec.title()?.to_string();

        let prompt = diagram::interpret_prompt(&self.spec.raw_spec);
        let raw = self.generator.generate_text(&prompt)?;
        let diagram = diagram::normalize(&raw);

        Ok(SpecOverview {
            title,
            diagram,
            server: self.servers.clone(),
            spec: self.spec.raw_spec.clone(),
        })
    }

    /// Synthesize a plausible request body for an endpoint+verb pair
    pub fn suggest_body(&self, path: &str, method: &str) -> Result<SuggestedRequest> {
        let prompt = REQUEST_BODY_PROMPT
            .replace("{path}", path)
            .replace("{method}", method)
            .replace("{spec}", &self.spec.raw_spec.to_string());

        let suggest_body = self.generator.generate_text(&prompt)?;

        Ok(SuggestedRequest {
            suggest_body,
            path: path.to_string(),
            method: method.to_string(),
        })
    }

    /// Proxy a request with the given body against the target server
    pub fn send_request(
        &self,
        path: &str,
        method: &str,
        body: &str,
    ) -> std::result::Result<Option<Value>, ProxyError> {
        let server = self.target_server().ok_or(ProxyError::NoTargetServer)?;
        proxy::send_request(&self.client, server, path, method, body)
    }
}
