//! Envelope and normalized response types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::results::AgentResult;
use super::AgentRole;

/// Agent-reported outcome inside an envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Success,
    Error,
    /// Any status string the service invents later; never trusted
    #[serde(other)]
    Unknown,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Envelope returned by the agent service: `{status, message?, result?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentEnvelope {
    pub status: AgentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl AgentEnvelope {
    /// Successful envelope carrying a result payload
    pub fn success(result: Value) -> Self {
        Self {
            status: AgentStatus::Success,
            message: None,
            result: Some(result),
        }
    }

    /// Agent-reported failure
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: AgentStatus::Error,
            message: Some(message.into()),
            result: None,
        }
    }
}

/// Uniform wrapper separating transport outcome from agent outcome.
///
/// `success` is true iff the call completed without transport error; the
/// envelope's `status` is the agent's own judgment. Check both (see
/// [`is_usable`](Self::is_usable)) before reading `result`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAgentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<AgentEnvelope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NormalizedAgentResponse {
    pub fn delivered(envelope: AgentEnvelope) -> Self {
        Self {
            success: true,
            response: Some(envelope),
            error: None,
        }
    }

    pub fn transport_failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(error.into()),
        }
    }

    /// Transport succeeded and the agent reported success
    pub fn is_usable(&self) -> bool {
        self.success
            && self
                .response
                .as_ref()
                .is_some_and(|r| r.status == AgentStatus::Success)
    }

    /// Transport error first, then the agent's own message
    pub fn failure_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or_else(|| self.response.as_ref().and_then(|r| r.message.as_deref()))
    }

    /// Raw result payload, if any arrived
    pub fn result(&self) -> Option<&Value> {
        self.response.as_ref().and_then(|r| r.result.as_ref())
    }

    /// Result payload decoded into the shape produced by `role`
    pub fn typed_result(&self, role: AgentRole) -> Option<AgentResult> {
        self.result().map(|value| AgentResult::decode(role, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_parses_minimal() {
        let envelope: AgentEnvelope = serde_json::from_value(json!({"status": "error"})).unwrap();
        assert_eq!(envelope.status, AgentStatus::Error);
        assert!(envelope.message.is_none());
        assert!(envelope.result.is_none());
    }

    #[test]
    fn test_unknown_status_is_not_usable() {
        let envelope: AgentEnvelope =
            serde_json::from_value(json!({"status": "pending", "result": {}})).unwrap();
        assert_eq!(envelope.status, AgentStatus::Unknown);
        assert!(!NormalizedAgentResponse::delivered(envelope).is_usable());
    }

    #[test]
    fn test_failure_message_prefers_transport_error() {
        let lost = NormalizedAgentResponse::transport_failure("timeout");
        assert_eq!(lost.failure_message(), Some("timeout"));

        let mut envelope = AgentEnvelope::error("agent said no");
        envelope.result = Some(json!({}));
        let refused = NormalizedAgentResponse::delivered(envelope);
        assert_eq!(refused.failure_message(), Some("agent said no"));

        let silent = NormalizedAgentResponse::delivered(AgentEnvelope {
            status: AgentStatus::Error,
            message: None,
            result: None,
        });
        assert_eq!(silent.failure_message(), None);
    }

    #[test]
    fn test_serialized_shape() {
        let ok = NormalizedAgentResponse::delivered(AgentEnvelope::success(json!({"a": 1})));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"success": true, "response": {"status": "success", "result": {"a": 1}}})
        );

        let lost = NormalizedAgentResponse::transport_failure("down");
        assert_eq!(
            serde_json::to_value(&lost).unwrap(),
            json!({"success": false, "error": "down"})
        );
    }
}
