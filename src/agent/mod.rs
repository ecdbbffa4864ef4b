//! # Agent Service Layer
//!
//! Addressing, transport and response normalization for the remote
//! multi-agent analysis service.
//!
//! ## Overview
//!
//! - [`AgentRole`] - the five agent roles and their fixed identifiers
//! - [`AgentTransport`] - one outbound call, returns the raw envelope
//! - [`HttpAgentTransport`] - production transport (reqwest)
//! - [`MockAgentTransport`] - scripted transport for tests and offline demos
//! - [`call_agent`] - wraps a transport call into a [`NormalizedAgentResponse`]
//!
//! ## Two outcomes, checked separately
//!
//! A call can fail in transit (no envelope at all), or arrive intact with the
//! agent itself reporting `status: "error"`. The normalized response keeps
//! both apart:
//!
//! ```rust
//! use somsov::agent::{AgentEnvelope, NormalizedAgentResponse};
//!
//! let lost = NormalizedAgentResponse::transport_failure("connection refused");
//! assert!(!lost.success);
//! assert!(!lost.is_usable());
//!
//! let refused = NormalizedAgentResponse::delivered(AgentEnvelope::error("bad columns"));
//! assert!(refused.success);
//! assert!(!refused.is_usable());
//! assert_eq!(refused.failure_message(), Some("bad columns"));
//! ```

mod http;
mod mock;
mod results;
mod types;

pub use http::HttpAgentTransport;
pub use mock::{demo_coordinator_result, MockAgentTransport, RecordedRequest};
pub use results::*;
pub use types::{AgentEnvelope, AgentStatus, NormalizedAgentResponse};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::SomSovConfig;
use crate::error::{Result, SomSovError};

// ============================================================================
// AGENT ROLES
// ============================================================================

/// Agent roles exposed by the analysis platform.
///
/// Only the coordinator is invoked by the analysis flow; it fans out to the
/// other four on the service side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentRole {
    Coordinator,
    DataValidation,
    SomSovCalculator,
    CompetitiveIntelligence,
    StrategicAdvisor,
}

/// Role → agent identifier table
pub const AGENT_IDS: [(AgentRole, &str); 5] = [
    (AgentRole::Coordinator, "6971045dd6d0dcaec11187d7"),
    (AgentRole::DataValidation, "697103d01d92f5e2dd22ae59"),
    (AgentRole::SomSovCalculator, "697103e71d92f5e2dd22ae5f"),
    (AgentRole::CompetitiveIntelligence, "697104041d92f5e2dd22ae71"),
    (AgentRole::StrategicAdvisor, "697104281d92f5e2dd22ae7c"),
];

impl AgentRole {
    pub const ALL: [AgentRole; 5] = [
        AgentRole::Coordinator,
        AgentRole::DataValidation,
        AgentRole::SomSovCalculator,
        AgentRole::CompetitiveIntelligence,
        AgentRole::StrategicAdvisor,
    ];

    /// Opaque identifier the service routes on
    pub fn agent_id(self) -> &'static str {
        let (_, id) = AGENT_IDS[self.index()];
        id
    }

    /// Reverse lookup from an identifier
    pub fn from_agent_id(id: &str) -> Option<Self> {
        AGENT_IDS
            .iter()
            .find(|(_, known)| *known == id)
            .map(|(role, _)| *role)
    }

    /// CLI slug (e.g. `som-sov-calculator`)
    pub fn slug(self) -> &'static str {
        match self {
            Self::Coordinator => "coordinator",
            Self::DataValidation => "data-validation",
            Self::SomSovCalculator => "som-sov-calculator",
            Self::CompetitiveIntelligence => "competitive-intelligence",
            Self::StrategicAdvisor => "strategic-advisor",
        }
    }

    /// Human-readable name
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Coordinator => "Analysis Coordinator",
            Self::DataValidation => "Data Validation",
            Self::SomSovCalculator => "SOM/SOV Calculator",
            Self::CompetitiveIntelligence => "Competitive Intelligence",
            Self::StrategicAdvisor => "Strategic Advisor",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Coordinator => 0,
            Self::DataValidation => 1,
            Self::SomSovCalculator => 2,
            Self::CompetitiveIntelligence => 3,
            Self::StrategicAdvisor => 4,
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for AgentRole {
    type Err = SomSovError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|role| role.slug() == wanted)
            .ok_or_else(|| SomSovError::UnknownRole {
                role: s.to_string(),
            })
    }
}

// ============================================================================
// TRANSPORT
// ============================================================================

/// Failure to obtain an envelope from the service
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Failed to reach agent service: {0}")]
    Request(String),

    #[error("Agent service error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse agent response: {0}")]
    Decode(String),
}

/// One outbound call to the agent platform.
///
/// Implementations make exactly one attempt per call: no retry, no
/// client-side timeout.
#[async_trait]
pub trait AgentTransport: Send + Sync {
    /// Transport name (e.g. "http", "mock")
    fn name(&self) -> &str;

    /// Send a free-text message to the agent with the given identifier
    async fn send(
        &self,
        message: &str,
        agent_id: &str,
    ) -> std::result::Result<AgentEnvelope, TransportError>;
}

/// Call an agent and normalize the outcome
pub async fn call_agent(
    transport: &dyn AgentTransport,
    message: &str,
    role: AgentRole,
) -> NormalizedAgentResponse {
    tracing::debug!(
        transport = transport.name(),
        role = %role,
        agent_id = role.agent_id(),
        message_len = message.len(),
        "Calling agent"
    );

    match transport.send(message, role.agent_id()).await {
        Ok(envelope) => {
            tracing::debug!(role = %role, status = %envelope.status, "Agent replied");
            NormalizedAgentResponse::delivered(envelope)
        }
        Err(e) => {
            tracing::error!(role = %role, error = %e, "Agent call failed");
            NormalizedAgentResponse::transport_failure(e.to_string())
        }
    }
}

/// Create a transport by name
///
/// | Name | Description |
/// |------|-------------|
/// | `http` | Agent service at the configured endpoint |
/// | `mock` | Offline transport returning a demo coordinator result |
pub fn create_transport(name: &str, config: &SomSovConfig) -> Result<Arc<dyn AgentTransport>> {
    match name.to_ascii_lowercase().as_str() {
        "http" => Ok(Arc::new(HttpAgentTransport::from_config(config)?)),
        "mock" => Ok(Arc::new(MockAgentTransport::new())),
        _ => Err(SomSovError::UnknownTransport {
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_ids_round_trip_through_table() {
        for role in AgentRole::ALL {
            assert_eq!(AgentRole::from_agent_id(role.agent_id()), Some(role));
        }
        assert_eq!(AgentRole::from_agent_id("nope"), None);
    }

    #[test]
    fn test_coordinator_id() {
        assert_eq!(AgentRole::Coordinator.agent_id(), "6971045dd6d0dcaec11187d7");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("coordinator".parse::<AgentRole>().unwrap(), AgentRole::Coordinator);
        assert_eq!(
            "SOM_SOV_CALCULATOR".parse::<AgentRole>().unwrap(),
            AgentRole::SomSovCalculator
        );
        assert!("oracle".parse::<AgentRole>().is_err());
    }

    #[test]
    fn test_create_transport() {
        let config = SomSovConfig::default();
        assert_eq!(create_transport("mock", &config).unwrap().name(), "mock");
        assert_eq!(create_transport("HTTP", &config).unwrap().name(), "http");
        assert!(create_transport("carrier-pigeon", &config).is_err());
    }

    #[tokio::test]
    async fn test_call_agent_normalizes_transport_error() {
        let mock = MockAgentTransport::new();
        mock.queue_failure(TransportError::Request("connection refused".to_string()));

        let normalized = call_agent(&mock, "hello", AgentRole::Coordinator).await;
        assert!(!normalized.success);
        assert!(normalized.response.is_none());
        assert_eq!(
            normalized.error.as_deref(),
            Some("Failed to reach agent service: connection refused")
        );
    }

    #[tokio::test]
    async fn test_call_agent_uses_role_identifier() {
        let mock = MockAgentTransport::new();
        call_agent(&mock, "hello", AgentRole::StrategicAdvisor).await;

        let request = mock.last_request().unwrap();
        assert_eq!(request.agent_id, "697104281d92f5e2dd22ae7c");
        assert_eq!(request.message, "hello");
    }
}
