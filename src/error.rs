//! Error types with fix suggestions

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SomSovError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Crate-level errors surfaced by the CLI and the dashboard.
///
/// Analysis outcomes have their own [`crate::analysis::AnalysisError`];
/// it converts into this type at the CLI boundary.
#[derive(Error, Debug)]
pub enum SomSovError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Input errors
    // ─────────────────────────────────────────────────────────────

    #[error("Unsupported file type '{extension}' (expected .csv, .xlsx or .xls)")]
    UnsupportedFileType { extension: String },

    #[error("Cannot read '{path}' as text: {reason}")]
    UnreadableInput { path: String, reason: String },

    #[error("Unknown agent role '{role}'")]
    UnknownRole { role: String },

    #[error("Unknown agent transport '{name}'. Available: http, mock")]
    UnknownTransport { name: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration errors
    // ─────────────────────────────────────────────────────────────

    #[error("Config error: {reason}")]
    ConfigError { reason: String },

    #[error("Invalid agent endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Analysis errors
    // ─────────────────────────────────────────────────────────────

    #[error("{0}")]
    Analysis(#[from] crate::analysis::AnalysisError),
}

impl FixSuggestion for SomSovError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            SomSovError::Io(_) => Some("Check file path and permissions"),
            SomSovError::Json(_) => None,
            SomSovError::UnsupportedFileType { .. } => {
                Some("Export the sheet as CSV and pass the .csv file")
            }
            SomSovError::UnreadableInput { .. } => {
                Some("Only plain-text CSV is parsed; save spreadsheets as CSV first")
            }
            SomSovError::UnknownRole { .. } => Some("Run `somsov agents` to list the roles"),
            SomSovError::UnknownTransport { .. } => Some("Use --agent http or --agent mock"),
            SomSovError::ConfigError { .. } => {
                Some("Fix or delete the config file (see `somsov config path`)")
            }
            SomSovError::InvalidEndpoint { .. } => {
                Some("Set SOMSOV_AGENT_ENDPOINT or [agent].endpoint to an http(s) URL")
            }
            SomSovError::Analysis(e) => e.fix_suggestion(),
        }
    }
}
