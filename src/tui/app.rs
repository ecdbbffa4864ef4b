//! TUI Application - Main entry point and run loop

use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use super::events::{handle_key_event, handle_paste, poll_event, Action};
use super::state::AppState;
use super::theme::{icons, ChocolateTheme};
use super::views::{key_hints, render_view, ActiveView};
use super::widgets::tab_line;
use crate::agent::AgentTransport;
use crate::analysis::{
    spawn_analysis, AnalysisError, AnalysisEvent, AnalysisHandle, AnalysisRunner,
};
use crate::config::SomSovConfig;
use crate::error::Result;
use crate::preview::load_input_file;

/// Render loop tick
const TICK_RATE: Duration = Duration::from_millis(50);

/// TUI Application
pub struct TuiApp {
    state: AppState,
    theme: ChocolateTheme,
    transport: Arc<dyn AgentTransport>,
    analysis: Option<AnalysisHandle>,
}

impl TuiApp {
    pub fn new(config: SomSovConfig, transport: Arc<dyn AgentTransport>) -> Self {
        Self {
            state: AppState::new(config),
            theme: ChocolateTheme::new(),
            transport,
            analysis: None,
        }
    }

    /// Pre-load market data and open on the analysis screen
    pub fn with_input_file(mut self, path: &Path) -> Result<Self> {
        let text = load_input_file(path)?;
        self.state.form.set_input(text);
        self.state.form.loaded_file = file_name(path);
        self.state.navigate(ActiveView::Analysis);
        Ok(self)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the TUI application
    pub async fn run(mut self) -> anyhow::Result<()> {
        tracing::info!(transport = self.transport.name(), "Dashboard started");
        let mut terminal = self.setup_terminal()?;

        let result = self.main_loop(&mut terminal).await;

        self.restore_terminal(&mut terminal)?;
        tracing::info!("Dashboard closed");
        result
    }

    fn setup_terminal(&self) -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.drain_analysis();

            terminal.draw(|frame| render(frame, &self.state, &self.theme))?;

            match poll_event(TICK_RATE)? {
                Some(Event::Key(key)) => {
                    let action = handle_key_event(key, &mut self.state);
                    self.perform(action);
                }
                Some(Event::Paste(text)) => handle_paste(&text, &mut self.state),
                _ => {}
            }

            if self.state.should_quit {
                break;
            }

            // Let the analysis task make progress between ticks.
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Carry out an action returned by the key handler
    pub fn perform(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.state.should_quit = true,
            Action::RunAnalysis => self.start_analysis(),
            Action::LoadFile(path) => self.load_file(&path),
            Action::SaveSettings => self.save_settings(),
        }
    }

    fn start_analysis(&mut self) {
        match self.state.begin_run() {
            Ok(request) => {
                let runner = AnalysisRunner::from_settings(
                    self.transport.clone(),
                    &self.state.settings.analysis,
                );
                self.analysis = Some(spawn_analysis(Arc::new(runner), request));
            }
            Err(e) => tracing::debug!(error = %e, "Analysis not started"),
        }
    }

    fn load_file(&mut self, path: &Path) {
        match load_input_file(path) {
            Ok(text) => {
                tracing::info!(path = %path.display(), bytes = text.len(), "Loaded input file");
                self.state.form.set_input(text);
                self.state.form.loaded_file = file_name(path);
                self.state.form.error = None;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not load input file");
                self.state.form.error = Some(e.to_string());
            }
        }
    }

    fn save_settings(&mut self) {
        let saved = match self.state.config_path.clone() {
            Some(path) => self.state.settings.save_to(&path).map(|_| path),
            None => self.state.settings.save(),
        };

        self.state.status_message = Some(match saved {
            Ok(path) => format!("Settings saved to {}", path.display()),
            Err(e) => e.to_string(),
        });
    }

    /// Apply every event the background run has reported so far
    pub fn drain_analysis(&mut self) {
        let Some(handle) = self.analysis.as_mut() else {
            return;
        };

        // Read before draining so events sent just before exit are not missed
        let exited = handle.is_finished();

        let mut finished = false;
        while let Some(event) = handle.try_next() {
            finished = event.is_terminal();
            self.state.apply_event(event);
            if finished {
                break;
            }
        }

        if !finished && exited {
            tracing::error!("Analysis task exited without reporting an outcome");
            self.state
                .apply_event(AnalysisEvent::Failed(AnalysisError::Interrupted));
            finished = true;
        }

        if finished {
            self.analysis = None;
        }
    }

    pub fn is_analysis_running(&self) -> bool {
        self.analysis.is_some()
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render the whole screen: header, menu, active view, footer
pub fn render(frame: &mut Frame, state: &AppState, theme: &ChocolateTheme) {
    let [header, menu, content, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(10),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header, state, theme);

    let titles: Vec<&str> = ActiveView::ALL.iter().map(|v| v.title()).collect();
    frame.render_widget(
        Paragraph::new(tab_line(&titles, state.active_view.index(), theme)),
        menu,
    );

    render_view(frame, content, state, theme);
    render_footer(frame, footer, state, theme);
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, theme: &ChocolateTheme) {
    let mut spans = vec![
        Span::styled(format!("{} SOM/SOV Analyzer", icons::BRAND), theme.header()),
        Span::raw("  │  "),
        Span::styled(state.market_name().to_string(), theme.accent()),
    ];
    if state.form.loading {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(
            format!("{}...", state.form.progress.label()),
            theme.warning(),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border());
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, theme: &ChocolateTheme) {
    let mut spans = vec![
        Span::styled(" [1-5]", theme.accent()),
        Span::styled(" view  ", theme.dimmed()),
    ];
    for (key, label) in key_hints(state.active_view) {
        spans.push(Span::styled(format!("[{}]", key), theme.accent()));
        spans.push(Span::styled(format!(" {}  ", label), theme.dimmed()));
    }
    spans.push(Span::styled("[q]", theme.accent()));
    spans.push(Span::styled("uit", theme.dimmed()));

    if let Some(ref message) = state.status_message {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(message.clone(), theme.success()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
