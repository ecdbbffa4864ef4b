//! AppState - Domain Layer
//!
//! Everything the screens read, plus the transitions that keys and analysis
//! events apply to it. Rendering never mutates state.

use std::path::PathBuf;

use crate::agent::{AgentRole, AgentResult, AnalysisCoordinatorResult, NormalizedAgentResponse};
use crate::analysis::{AnalysisError, AnalysisEvent, AnalysisRequest, Progress};
use crate::config::SomSovConfig;
use crate::placeholders::{HistorySelection, HISTORY};
use crate::preview::{parse_preview, PreviewGrid};

use super::views::{ActiveView, ResultsTab};

// ─────────────────────────────────────────────────────────────────────────────
// Analysis form
// ─────────────────────────────────────────────────────────────────────────────

/// Text fields on the analysis screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Data,
    Period,
    Competitors,
    FilePath,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Data => "Market Data",
            Self::Period => "Analysis Period",
            Self::Competitors => "Competitor Brands",
            Self::FilePath => "Load File",
        }
    }
}

/// Whether keys go to navigation or into a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing(FormField),
}

/// Input and run state of the new-analysis screen
#[derive(Debug, Clone, Default)]
pub struct AnalysisForm {
    input: String,
    preview: PreviewGrid,
    pub period: String,
    pub competitors: String,
    pub file_path: String,
    /// Name of the last loaded file, for display
    pub loaded_file: Option<String>,
    pub progress: Progress,
    pub loading: bool,
    pub error: Option<String>,
}

impl AnalysisForm {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn preview(&self) -> &PreviewGrid {
        &self.preview
    }

    /// Replace the raw input; the preview is rebuilt from scratch
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.preview = parse_preview(&self.input);
    }

    pub fn push_str(&mut self, text: &str) {
        let mut input = std::mem::take(&mut self.input);
        input.push_str(text);
        self.set_input(input);
    }

    pub fn pop_char(&mut self) {
        let mut input = std::mem::take(&mut self.input);
        input.pop();
        self.set_input(input);
    }

    /// Text buffer behind a form field
    pub fn field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Data => None,
            FormField::Period => Some(&mut self.period),
            FormField::Competitors => Some(&mut self.competitors),
            FormField::FilePath => Some(&mut self.file_path),
        }
    }

    pub fn request(&self) -> AnalysisRequest {
        AnalysisRequest::new(self.input.clone())
            .with_period(self.period.clone())
            .with_competitors(&self.competitors)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Toggles on the settings screen, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsToggle {
    SimulateProgress,
    NotifyOnComplete,
    AlertOnSignificantChange,
}

impl SettingsToggle {
    pub const ALL: [SettingsToggle; 3] = [
        SettingsToggle::SimulateProgress,
        SettingsToggle::NotifyOnComplete,
        SettingsToggle::AlertOnSignificantChange,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SimulateProgress => "Animate analysis steps",
            Self::NotifyOnComplete => "Notify when analysis completes",
            Self::AlertOnSignificantChange => "Alert on significant market changes",
        }
    }

    pub fn value(self, config: &SomSovConfig) -> bool {
        match self {
            Self::SimulateProgress => config.analysis.simulate_progress,
            Self::NotifyOnComplete => config.notifications.notify_on_complete,
            Self::AlertOnSignificantChange => config.notifications.alert_on_significant_change,
        }
    }

    fn flip(self, config: &mut SomSovConfig) {
        let slot = match self {
            Self::SimulateProgress => &mut config.analysis.simulate_progress,
            Self::NotifyOnComplete => &mut config.notifications.notify_on_complete,
            Self::AlertOnSignificantChange => &mut config.notifications.alert_on_significant_change,
        };
        *slot = !*slot;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Core State
// ─────────────────────────────────────────────────────────────────────────────

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub active_view: ActiveView,
    pub input_mode: InputMode,

    /// Most recent successful analysis; survives navigation
    pub result: Option<NormalizedAgentResponse>,
    pub results_tab: ResultsTab,

    pub form: AnalysisForm,

    pub history: HistorySelection,
    pub history_cursor: usize,

    pub settings: SomSovConfig,
    pub settings_cursor: usize,
    /// Where `s` on the settings screen writes; `None` uses the default path
    pub config_path: Option<PathBuf>,

    /// One-line notice in the footer
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SomSovConfig::default())
    }
}

impl AppState {
    pub fn new(settings: SomSovConfig) -> Self {
        let mut form = AnalysisForm::default();
        form.period = settings.analysis.default_period.clone();

        Self {
            active_view: ActiveView::default(),
            input_mode: InputMode::Normal,
            result: None,
            results_tab: ResultsTab::default(),
            form,
            history: HistorySelection::default(),
            history_cursor: 0,
            settings,
            settings_cursor: 0,
            config_path: None,
            status_message: None,
            should_quit: false,
        }
    }

    /// Switch screens. Nothing else changes.
    pub fn navigate(&mut self, view: ActiveView) {
        if self.active_view != view {
            tracing::debug!(from = %self.active_view, to = %view, "Navigate");
        }
        self.active_view = view;
        self.input_mode = InputMode::Normal;
    }

    pub fn market_name(&self) -> &str {
        &self.settings.analysis.market_name
    }

    // ─────────────────────────────────────────────────────────────────────
    // Analysis lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Validate the form and mark a run as in flight.
    ///
    /// Rejections leave progress untouched and show the message inline.
    pub fn begin_run(&mut self) -> Result<AnalysisRequest, AnalysisError> {
        if self.form.loading {
            return Err(AnalysisError::AlreadyRunning);
        }

        let request = self.form.request();
        if request.is_blank() {
            self.form.error = Some(AnalysisError::EmptyInput.to_string());
            return Err(AnalysisError::EmptyInput);
        }

        self.form.loading = true;
        self.form.error = None;
        self.form.progress = Progress::Idle;
        self.input_mode = InputMode::Normal;
        Ok(request)
    }

    /// Apply one event from a background run
    pub fn apply_event(&mut self, event: AnalysisEvent) {
        match event {
            AnalysisEvent::Progress(progress) => self.form.progress = progress,
            AnalysisEvent::Completed(response) => {
                self.form.loading = false;
                if self.settings.notifications.notify_on_complete {
                    self.status_message = Some("Analysis complete".to_string());
                }
                self.store_result(response);
            }
            AnalysisEvent::Failed(error) => {
                self.form.loading = false;
                self.form.error = Some(error.to_string());
            }
        }
    }

    /// Keep a finished analysis and show it
    pub fn store_result(&mut self, response: NormalizedAgentResponse) {
        self.result = Some(response);
        self.results_tab = ResultsTab::default();
        self.navigate(ActiveView::Results);
    }

    /// Decoded coordinator payload of the stored result
    pub fn stored_result(&self) -> Option<AgentResult> {
        self.result
            .as_ref()
            .and_then(|r| r.typed_result(AgentRole::Coordinator))
    }

    pub fn coordinator_result(&self) -> Option<AnalysisCoordinatorResult> {
        match self.stored_result()? {
            AgentResult::Coordinator(result) => Some(result),
            _ => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // History and settings
    // ─────────────────────────────────────────────────────────────────────

    pub fn move_history_cursor(&mut self, delta: isize) {
        self.history_cursor = step(self.history_cursor, delta, HISTORY.len());
    }

    pub fn toggle_history_selection(&mut self) {
        if let Some(entry) = HISTORY.get(self.history_cursor) {
            self.history.toggle(entry.id);
        }
    }

    pub fn move_settings_cursor(&mut self, delta: isize) {
        self.settings_cursor = step(self.settings_cursor, delta, SettingsToggle::ALL.len());
    }

    pub fn toggle_setting(&mut self) {
        if let Some(toggle) = SettingsToggle::ALL.get(self.settings_cursor) {
            toggle.flip(&mut self.settings);
        }
    }
}

/// Move `current` by `delta`, clamped to `0..len`
fn step(current: usize, delta: isize, len: usize) -> usize {
    current
        .saturating_add_signed(delta)
        .min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{demo_coordinator_result, AgentEnvelope};

    fn demo_response() -> NormalizedAgentResponse {
        NormalizedAgentResponse::delivered(AgentEnvelope::success(demo_coordinator_result()))
    }

    #[test]
    fn test_set_input_rebuilds_preview() {
        let mut form = AnalysisForm::default();
        form.set_input("a,b\n1,2\n3,4");
        assert_eq!(form.preview().len(), 3);

        form.set_input("x");
        assert_eq!(form.preview().rows(), &[vec!["x".to_string()]]);
    }

    #[test]
    fn test_push_and_pop_keep_preview_in_sync() {
        let mut form = AnalysisForm::default();
        form.push_str("a,b\n1");
        form.push_str(",2");
        assert_eq!(form.preview().rows()[1], vec!["1", "2"]);

        form.pop_char();
        assert_eq!(form.preview().rows()[1], vec!["1", ""]);
    }

    #[test]
    fn test_begin_run_rejects_blank_input() {
        let mut state = AppState::default();
        state.form.set_input("   ");

        assert_eq!(state.begin_run(), Err(AnalysisError::EmptyInput));
        assert_eq!(state.form.error.as_deref(), Some("Please provide market data"));
        assert_eq!(state.form.progress, Progress::Idle);
        assert!(!state.form.loading);
    }

    #[test]
    fn test_begin_run_blocks_second_run() {
        let mut state = AppState::default();
        state.form.set_input("a,b");

        assert!(state.begin_run().is_ok());
        assert!(state.form.loading);
        assert_eq!(state.begin_run(), Err(AnalysisError::AlreadyRunning));
    }

    #[test]
    fn test_begin_run_carries_period_and_competitors() {
        let mut state = AppState::default();
        state.form.set_input("a,b");
        state.form.period = "March 2024".into();
        state.form.competitors = "Brand B, Brand C".into();

        let request = state.begin_run().unwrap();
        assert_eq!(request.period.as_deref(), Some("March 2024"));
        assert_eq!(request.competitors, vec!["Brand B", "Brand C"]);
    }

    #[test]
    fn test_completed_event_stores_and_navigates() {
        let mut state = AppState::default();
        state.form.set_input("a,b");
        state.begin_run().unwrap();

        state.apply_event(AnalysisEvent::Progress(Progress::Complete));
        state.apply_event(AnalysisEvent::Completed(demo_response()));

        assert!(!state.form.loading);
        assert_eq!(state.active_view, ActiveView::Results);
        assert_eq!(
            state.coordinator_result().unwrap().market_metrics.efficiency_leader,
            "Brand B"
        );
    }

    #[test]
    fn test_failed_event_surfaces_message() {
        let mut state = AppState::default();
        state.navigate(ActiveView::Analysis);
        state.form.set_input("a,b");
        state.begin_run().unwrap();

        state.apply_event(AnalysisEvent::Progress(Progress::Recommending));
        state.apply_event(AnalysisEvent::Failed(AnalysisError::Agent("bad data".into())));

        assert!(!state.form.loading);
        assert_eq!(state.form.error.as_deref(), Some("bad data"));
        assert_eq!(state.form.progress, Progress::Recommending);
        assert_eq!(state.active_view, ActiveView::Analysis);
        assert!(state.result.is_none());
    }

    #[test]
    fn test_navigation_keeps_result() {
        let mut state = AppState::default();
        state.store_result(demo_response());

        for view in ActiveView::ALL {
            state.navigate(view);
            assert!(state.result.is_some());
        }
        state.navigate(ActiveView::Results);
        assert!(state.coordinator_result().is_some());
    }

    #[test]
    fn test_default_period_prefills_form() {
        let mut config = SomSovConfig::default();
        config.analysis.default_period = "Monthly".into();
        assert_eq!(AppState::new(config).form.period, "Monthly");
    }

    #[test]
    fn test_settings_toggle() {
        let mut state = AppState::default();
        state.move_settings_cursor(1);
        assert!(state.settings.notifications.notify_on_complete);
        state.toggle_setting();
        assert!(!state.settings.notifications.notify_on_complete);

        state.move_settings_cursor(10);
        assert_eq!(state.settings_cursor, SettingsToggle::ALL.len() - 1);
        state.move_settings_cursor(-10);
        assert_eq!(state.settings_cursor, 0);
    }

    #[test]
    fn test_history_cursor_selection() {
        let mut state = AppState::default();
        state.toggle_history_selection();
        state.move_history_cursor(1);
        state.toggle_history_selection();
        state.move_history_cursor(1);
        state.toggle_history_selection();

        assert_eq!(state.history.ids(), &[1, 2]);
        assert!(state.history.can_compare());
    }
}
