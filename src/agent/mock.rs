//! Mock transport for tests and offline demos
//!
//! Returns scripted outcomes without touching the network.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{AgentEnvelope, AgentTransport, TransportError};

type Outcome = Result<AgentEnvelope, TransportError>;

/// A request seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub message: String,
    pub agent_id: String,
}

/// Mock transport that replays queued outcomes
pub struct MockAgentTransport {
    /// Queue of outcomes to return (FIFO)
    outcomes: Arc<Mutex<Vec<Outcome>>>,
    /// Envelope returned once the queue is empty
    default_envelope: AgentEnvelope,
    /// Track all requests made (for assertions)
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockAgentTransport {
    /// Create a mock that answers with [`demo_coordinator_result`]
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(vec![])),
            default_envelope: AgentEnvelope::success(demo_coordinator_result()),
            requests: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Set the envelope returned when the queue is empty
    pub fn with_default(mut self, envelope: AgentEnvelope) -> Self {
        self.default_envelope = envelope;
        self
    }

    /// Queue an envelope
    pub fn queue_envelope(&self, envelope: AgentEnvelope) {
        lock(&self.outcomes).push(Ok(envelope));
    }

    /// Queue a transport failure
    pub fn queue_failure(&self, error: TransportError) {
        lock(&self.outcomes).push(Err(error));
    }

    /// Get all requests made to this transport
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Get the last request made
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

impl Default for MockAgentTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentTransport for MockAgentTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, message: &str, agent_id: &str) -> Outcome {
        lock(&self.requests).push(RecordedRequest {
            message: message.to_string(),
            agent_id: agent_id.to_string(),
        });

        let mut queue = lock(&self.outcomes);
        if queue.is_empty() {
            Ok(self.default_envelope.clone())
        } else {
            queue.remove(0)
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Coordinator payload used by the offline demo
pub fn demo_coordinator_result() -> Value {
    json!({
        "validation_summary": {
            "data_quality_status": "Valid",
            "issues_found": [],
            "total_brands_analyzed": 3
        },
        "market_metrics": {
            "total_market_share": 100,
            "total_voice_share": 100,
            "top_brand_som": 46.88,
            "top_brand_sov": 44.44,
            "efficiency_leader": "Brand B"
        },
        "competitive_insights": {
            "market_trends": [
                "Premium dark chocolate growing faster than milk chocolate",
                "Single-serve formats gaining share in convenience channels"
            ],
            "competitor_activities": [
                "Brand A launched a protein bar line extension",
                "Brand C increased digital spend ahead of Easter"
            ],
            "industry_developments": [
                "Cocoa prices remain elevated, pressuring margins"
            ]
        },
        "strategic_recommendations": {
            "priority_actions": [
                "Shift media weight toward digital video to defend voice share",
                "Expand single-serve distribution in convenience stores"
            ],
            "risk_areas": ["Cocoa cost inflation", "Private label price pressure"],
            "opportunity_areas": ["Seasonal gifting", "Better-for-you variants"]
        }
    })
}
