//! # Analysis Orchestration
//!
//! Drives one market analysis: validates the input locally, makes the single
//! coordinator call and reports progress while it runs.
//!
//! ## Run sequence
//!
//! ```text
//!   idle ──► validating ──► calculating ──► [agent call] ──► researching
//!                                                                │ step delay
//!                                                                ▼
//!              complete ◄── (usable response only) ◄──── recommending
//!                                                                  step delay
//! ```
//!
//! Researching and recommending are cosmetic: the coordinator has already
//! answered by then. With `simulate_progress` off they are emitted without
//! delay. A failed run stops at recommending and never reports complete.

mod progress;
mod prompt;

pub use progress::Progress;
pub use prompt::{AnalysisRequest, ANALYSIS_INSTRUCTION};

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::agent::{call_agent, AgentRole, AgentTransport, NormalizedAgentResponse};
use crate::config::{AnalysisSettings, DEFAULT_MARKET_NAME};
use crate::error::FixSuggestion;

/// Message used when the agent fails without explaining why
pub const ANALYSIS_FAILED_FALLBACK: &str = "Analysis failed";

/// Why a run did not produce a usable result
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Please provide market data")]
    EmptyInput,

    #[error("An analysis is already running")]
    AlreadyRunning,

    /// The call never produced an envelope
    #[error("{0}")]
    Transport(String),

    /// The agent answered with a non-success status
    #[error("{0}")]
    Agent(String),

    /// The background task stopped before reporting an outcome
    #[error("Analysis task ended without a result")]
    Interrupted,
}

impl FixSuggestion for AnalysisError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            AnalysisError::EmptyInput => Some("Paste CSV data or load a .csv file first"),
            AnalysisError::AlreadyRunning => Some("Wait for the current analysis to finish"),
            AnalysisError::Transport(_) => {
                Some("Check the agent endpoint (SOMSOV_AGENT_ENDPOINT) and your network")
            }
            AnalysisError::Agent(_) => {
                Some("Check the data has Brand, Sales_Volume, Sales_Value, Media_Spend, Period")
            }
            AnalysisError::Interrupted => Some("Run the analysis again; see the log for details"),
        }
    }
}

/// Runs analyses against the coordinator agent
pub struct AnalysisRunner {
    transport: Arc<dyn AgentTransport>,
    market_name: String,
    simulate_progress: bool,
    step_delay: Duration,
}

impl AnalysisRunner {
    pub fn new(transport: Arc<dyn AgentTransport>) -> Self {
        let defaults = AnalysisSettings::default();
        Self {
            transport,
            market_name: DEFAULT_MARKET_NAME.to_string(),
            simulate_progress: defaults.simulate_progress,
            step_delay: defaults.step_delay(),
        }
    }

    pub fn from_settings(transport: Arc<dyn AgentTransport>, settings: &AnalysisSettings) -> Self {
        Self {
            transport,
            market_name: settings.market_name.clone(),
            simulate_progress: settings.simulate_progress,
            step_delay: settings.step_delay(),
        }
    }

    pub fn with_market_name(mut self, name: impl Into<String>) -> Self {
        self.market_name = name.into();
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Emit the cosmetic steps without waiting
    pub fn without_simulated_progress(mut self) -> Self {
        self.simulate_progress = false;
        self
    }

    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    /// Run one analysis, reporting every progress change to `on_progress`.
    ///
    /// Blank input is rejected before anything is emitted or sent.
    pub async fn run<F>(
        &self,
        request: &AnalysisRequest,
        mut on_progress: F,
    ) -> Result<NormalizedAgentResponse, AnalysisError>
    where
        F: FnMut(Progress) + Send,
    {
        if request.is_blank() {
            return Err(AnalysisError::EmptyInput);
        }

        tracing::info!(
            transport = self.transport.name(),
            market = %self.market_name,
            bytes = request.data.len(),
            "Starting analysis"
        );

        on_progress(Progress::Validating);
        let prompt = request.prompt(&self.market_name);

        on_progress(Progress::Calculating);
        let response = call_agent(self.transport.as_ref(), &prompt, AgentRole::Coordinator).await;

        on_progress(Progress::Researching);
        self.pause().await;
        on_progress(Progress::Recommending);
        self.pause().await;

        if response.is_usable() {
            tracing::info!("Analysis complete");
            on_progress(Progress::Complete);
            return Ok(response);
        }

        let error = if response.success {
            AnalysisError::Agent(
                response
                    .failure_message()
                    .unwrap_or(ANALYSIS_FAILED_FALLBACK)
                    .to_string(),
            )
        } else {
            AnalysisError::Transport(
                response
                    .error
                    .unwrap_or_else(|| ANALYSIS_FAILED_FALLBACK.to_string()),
            )
        };
        tracing::warn!(error = %error, "Analysis failed");
        Err(error)
    }

    async fn pause(&self) {
        if self.simulate_progress && !self.step_delay.is_zero() {
            tokio::time::sleep(self.step_delay).await;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Background runs
// ─────────────────────────────────────────────────────────────────────────────

/// Events reported by a background run
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisEvent {
    Progress(Progress),
    Completed(NormalizedAgentResponse),
    Failed(AnalysisError),
}

impl AnalysisEvent {
    /// Whether this event ends the run
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress(_))
    }
}

/// Handle to an analysis running on a tokio task
pub struct AnalysisHandle {
    events: mpsc::UnboundedReceiver<AnalysisEvent>,
    task: JoinHandle<()>,
}

impl AnalysisHandle {
    /// Next event if one is ready (non-blocking, for the render loop)
    pub fn try_next(&mut self) -> Option<AnalysisEvent> {
        self.events.try_recv().ok()
    }

    /// Wait for the next event; `None` once the run has finished
    pub async fn next(&mut self) -> Option<AnalysisEvent> {
        self.events.recv().await
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Consume the handle as a stream of events
    pub fn into_stream(self) -> UnboundedReceiverStream<AnalysisEvent> {
        UnboundedReceiverStream::new(self.events)
    }
}

/// Start an analysis on the current tokio runtime
pub fn spawn_analysis(runner: Arc<AnalysisRunner>, request: AnalysisRequest) -> AnalysisHandle {
    let (tx, events) = mpsc::unbounded_channel();

    let task = tokio::spawn(async move {
        let progress_tx = tx.clone();
        let outcome = runner
            .run(&request, move |progress| {
                let _ = progress_tx.send(AnalysisEvent::Progress(progress));
            })
            .await;

        let _ = tx.send(match outcome {
            Ok(response) => AnalysisEvent::Completed(response),
            Err(error) => AnalysisEvent::Failed(error),
        });
    });

    AnalysisHandle { events, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentEnvelope, MockAgentTransport, TransportError};

    fn runner(mock: &Arc<MockAgentTransport>) -> AnalysisRunner {
        AnalysisRunner::new(mock.clone()).without_simulated_progress()
    }

    #[tokio::test]
    async fn test_blank_input_never_calls_agent() {
        let mock = Arc::new(MockAgentTransport::new());
        let mut seen = Vec::new();

        let result = runner(&mock)
            .run(&AnalysisRequest::new("  \n "), |p| seen.push(p))
            .await;

        assert_eq!(result, Err(AnalysisError::EmptyInput));
        assert!(seen.is_empty());
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_agent_error_without_message_uses_fallback() {
        let mock = Arc::new(MockAgentTransport::new());
        mock.queue_envelope(AgentEnvelope {
            status: crate::agent::AgentStatus::Error,
            message: None,
            result: None,
        });

        let result = runner(&mock).run(&AnalysisRequest::new("a,b"), |_| {}).await;
        assert_eq!(result, Err(AnalysisError::Agent("Analysis failed".to_string())));
    }

    #[tokio::test]
    async fn test_transport_error_message_is_verbatim() {
        let mock = Arc::new(MockAgentTransport::new());
        mock.queue_failure(TransportError::Request("dns failure".to_string()));

        let result = runner(&mock).run(&AnalysisRequest::new("a,b"), |_| {}).await;
        assert_eq!(
            result,
            Err(AnalysisError::Transport(
                "Failed to reach agent service: dns failure".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_market_name_goes_into_prompt() {
        let mock = Arc::new(MockAgentTransport::new());
        runner(&mock)
            .with_market_name("Energy Drinks Market")
            .run(&AnalysisRequest::new("a,b"), |_| {})
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert!(request.message.starts_with("Analyze this energy drinks market data:"));
        assert_eq!(request.agent_id, AgentRole::Coordinator.agent_id());
    }

    #[tokio::test]
    async fn test_simulated_steps_wait_between_events() {
        let mock = Arc::new(MockAgentTransport::new());
        let runner = AnalysisRunner::new(mock).with_step_delay(Duration::from_millis(20));

        let started = tokio::time::Instant::now();
        runner.run(&AnalysisRequest::new("a,b"), |_| {}).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_spawned_run_reports_terminal_event() {
        let mock = Arc::new(MockAgentTransport::new());
        let mut handle = spawn_analysis(Arc::new(runner(&mock)), AnalysisRequest::new("a,b"));

        let mut last = None;
        while let Some(event) = handle.next().await {
            last = Some(event);
        }

        assert!(matches!(last, Some(AnalysisEvent::Completed(_))));
    }
}
