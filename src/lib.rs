//! SOM/SOV Analyzer - market share and share-of-voice dashboard
//!
//! Market data goes in as CSV text, one call goes out to the coordinator of
//! a remote multi-agent service, and the structured answer is rendered in a
//! terminal dashboard.

pub mod agent;
pub mod analysis;
pub mod config;
pub mod error;
pub mod placeholders;
pub mod preview;
pub mod tui;

pub use agent::{
    call_agent, create_transport, AgentEnvelope, AgentResult, AgentRole, AgentTransport,
    NormalizedAgentResponse,
};
pub use analysis::{
    spawn_analysis, AnalysisError, AnalysisEvent, AnalysisRequest, AnalysisRunner, Progress,
};
pub use config::SomSovConfig;
pub use error::{FixSuggestion, SomSovError};
pub use preview::{parse_preview, PreviewGrid};
