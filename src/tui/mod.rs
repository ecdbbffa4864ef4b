//! TUI Module - Market Analysis Dashboard
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     UI LAYER (views/, widgets/)                     │
//! │  Pure rendering. One render branch per ActiveView.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ &AppState
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      DOMAIN LAYER (state.rs)                        │
//! │  AppState. Applies key actions and AnalysisEvents.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ AnalysisEvent (mpsc, drained per tick)
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   CONNECTOR LAYER (crate::analysis)                 │
//! │  spawn_analysis on a tokio task. AgentTransport: http or mock.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod events;
mod state;
mod theme;

pub mod views;
pub mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

pub use app::{render, TuiApp};
pub use events::{handle_key_event, handle_paste, Action};
pub use state::{AnalysisForm, AppState, FormField, InputMode, SettingsToggle};
pub use theme::ChocolateTheme;
pub use views::{ActiveView, ResultsTab};

use crate::agent::AgentTransport;
use crate::config::SomSovConfig;

/// Run the dashboard until the user quits
pub async fn run(
    config: SomSovConfig,
    transport: Arc<dyn AgentTransport>,
    input: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut app = TuiApp::new(config, transport);
    if let Some(path) = input {
        app = app.with_input_file(&path)?;
    }
    app.run().await
}
