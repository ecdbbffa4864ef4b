//! Orchestration flow against the scripted transport

use std::sync::Arc;

use somsov::agent::{AgentEnvelope, AgentStatus, MockAgentTransport, TransportError};
use somsov::analysis::{
    spawn_analysis, AnalysisError, AnalysisEvent, AnalysisRequest, AnalysisRunner, Progress,
};
use somsov::tui::{ActiveView, AppState};
use tokio_stream::StreamExt;

const DATA: &str = "Brand,Sales_Volume,Sales_Value,Media_Spend,Period\n\
                    Brand A,7500000,7500000,2000000,March 2024";

fn runner(mock: &Arc<MockAgentTransport>) -> AnalysisRunner {
    AnalysisRunner::new(mock.clone()).without_simulated_progress()
}

async fn run_collecting(
    mock: &Arc<MockAgentTransport>,
    data: &str,
) -> (Vec<Progress>, Result<somsov::NormalizedAgentResponse, AnalysisError>) {
    let mut seen = Vec::new();
    let result = runner(mock)
        .run(&AnalysisRequest::new(data), |p| seen.push(p))
        .await;
    (seen, result)
}

#[tokio::test]
async fn test_whitespace_input_never_reaches_transport() {
    let mock = Arc::new(MockAgentTransport::new());

    for input in ["", "   ", "\n\t \n"] {
        let (seen, result) = run_collecting(&mock, input).await;
        assert_eq!(result, Err(AnalysisError::EmptyInput));
        assert!(seen.is_empty());
    }

    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_success_walks_every_step_in_order() {
    let mock = Arc::new(MockAgentTransport::new());
    let (seen, result) = run_collecting(&mock, DATA).await;

    assert_eq!(
        seen,
        vec![
            Progress::Validating,
            Progress::Calculating,
            Progress::Researching,
            Progress::Recommending,
            Progress::Complete,
        ]
    );
    let response = result.unwrap();
    assert!(response.is_usable());
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_prompt_carries_raw_input() {
    let mock = Arc::new(MockAgentTransport::new());
    run_collecting(&mock, DATA).await.1.unwrap();

    let message = mock.last_request().unwrap().message;
    assert!(message.starts_with("Analyze this chocolate snacking market data:\n\n"));
    assert!(message.contains(DATA));
    assert!(message.ends_with("strategic recommendations."));
}

#[tokio::test]
async fn test_transport_failure_surfaces_message_and_stops_short() {
    let mock = Arc::new(MockAgentTransport::new());
    mock.queue_failure(TransportError::Request("connection refused".to_string()));

    let (seen, result) = run_collecting(&mock, DATA).await;

    assert_eq!(
        result,
        Err(AnalysisError::Transport(
            "Failed to reach agent service: connection refused".to_string()
        ))
    );
    assert!(!seen.contains(&Progress::Complete));
    assert_eq!(seen.last(), Some(&Progress::Recommending));
}

#[tokio::test]
async fn test_agent_error_uses_envelope_message() {
    let mock = Arc::new(MockAgentTransport::new());
    mock.queue_envelope(AgentEnvelope::error("Period column missing"));

    let (seen, result) = run_collecting(&mock, DATA).await;

    assert_eq!(
        result,
        Err(AnalysisError::Agent("Period column missing".to_string()))
    );
    assert!(!seen.contains(&Progress::Complete));
}

#[tokio::test]
async fn test_agent_error_without_message_falls_back() {
    let mock = Arc::new(MockAgentTransport::new());
    mock.queue_envelope(AgentEnvelope {
        status: AgentStatus::Error,
        message: None,
        result: None,
    });

    let (_, result) = run_collecting(&mock, DATA).await;
    assert_eq!(result.unwrap_err().to_string(), "Analysis failed");
}

#[tokio::test]
async fn test_unknown_status_is_a_failure() {
    let mock = Arc::new(MockAgentTransport::new());
    mock.queue_envelope(AgentEnvelope {
        status: AgentStatus::Unknown,
        message: Some("still thinking".into()),
        result: None,
    });

    let (seen, result) = run_collecting(&mock, DATA).await;
    assert_eq!(result, Err(AnalysisError::Agent("still thinking".into())));
    assert!(!seen.contains(&Progress::Complete));
}

#[tokio::test]
async fn test_spawned_run_streams_events() {
    let mock = Arc::new(MockAgentTransport::new());
    let handle = spawn_analysis(Arc::new(runner(&mock)), AnalysisRequest::new(DATA));
    let events: Vec<AnalysisEvent> = handle.into_stream().collect().await;

    assert_eq!(events.len(), 6);
    assert_eq!(events[0], AnalysisEvent::Progress(Progress::Validating));
    assert!(matches!(events[5], AnalysisEvent::Completed(_)));
}

#[tokio::test]
async fn test_state_follows_successful_run_to_results() {
    let mock = Arc::new(MockAgentTransport::new());
    let mut state = AppState::default();
    state.navigate(ActiveView::Analysis);
    state.form.set_input(DATA);

    let request = state.begin_run().unwrap();
    let mut handle = spawn_analysis(Arc::new(runner(&mock)), request);
    while let Some(event) = handle.next().await {
        state.apply_event(event);
    }

    assert_eq!(state.form.progress, Progress::Complete);
    assert!(!state.form.loading);
    assert_eq!(state.active_view, ActiveView::Results);

    // Navigation alone never clears the stored result
    for view in ActiveView::ALL {
        state.navigate(view);
    }
    state.navigate(ActiveView::Results);
    assert_eq!(
        state
            .coordinator_result()
            .map(|r| r.market_metrics.efficiency_leader),
        Some("Brand B".to_string())
    );
}
