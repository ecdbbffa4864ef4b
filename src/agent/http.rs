//! HTTP transport to the agent service
//!
//! Posts `{"message", "agent_id"}` as JSON to the configured endpoint and
//! decodes the `{status, message?, result?}` envelope.

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use super::{AgentEnvelope, AgentTransport, TransportError};
use crate::config::{parse_endpoint, SomSovConfig};
use crate::error::Result;

/// Transport that calls the agent service over HTTP
pub struct HttpAgentTransport {
    /// HTTP client
    client: reqwest::Client,
    /// Agent endpoint
    endpoint: Url,
    /// Bearer token, if the service requires one
    api_key: Option<String>,
}

impl HttpAgentTransport {
    /// Create a transport for the given endpoint
    pub fn new(endpoint: &str) -> Result<Self> {
        Ok(Self::with_url(parse_endpoint(endpoint)?))
    }

    /// Create a transport for an already validated endpoint
    pub fn with_url(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: None,
        }
    }

    /// Create from the effective configuration
    pub fn from_config(config: &SomSovConfig) -> Result<Self> {
        let transport = Self::with_url(config.endpoint()?);
        Ok(match config.api_key() {
            Some(key) => transport.with_api_key(key),
            None => transport,
        })
    }

    /// Set the bearer token
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = (!key.is_empty()).then_some(key);
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AgentTransport for HttpAgentTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(
        &self,
        message: &str,
        agent_id: &str,
    ) -> std::result::Result<AgentEnvelope, TransportError> {
        let payload = AgentRequest { message, agent_id };

        tracing::debug!(
            transport = "http",
            endpoint = %self.endpoint,
            agent_id,
            "Sending request to agent service"
        );

        let mut request = self.client.post(self.endpoint.clone()).json(&payload);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                transport = "http",
                status = %status,
                body = %body,
                "Agent service error"
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: AgentEnvelope = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        tracing::debug!(
            transport = "http",
            status = %envelope.status,
            has_result = envelope.result.is_some(),
            "Agent service response received"
        );

        Ok(envelope)
    }
}

// ============================================================================
// API TYPES
// ============================================================================

#[derive(Debug, Serialize)]
struct AgentRequest<'a> {
    message: &'a str,
    agent_id: &'a str,
}
