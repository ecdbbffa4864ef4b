//! SOM/SOV Analyzer Configuration
//!
//! Persistent settings for the agent endpoint and analysis defaults.
//! Config is stored in `~/.config/somsov/config.toml`.
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. Environment variables (`SOMSOV_AGENT_ENDPOINT`, `SOMSOV_API_KEY`)
//! 2. Config file (`~/.config/somsov/config.toml`)
//! 3. Defaults

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SomSovError};

/// Endpoint used when nothing is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/agent";

/// Market the dashboard is set up for
pub const DEFAULT_MARKET_NAME: &str = "Chocolate Snacking Market";

pub const ENV_ENDPOINT: &str = "SOMSOV_AGENT_ENDPOINT";
pub const ENV_API_KEY: &str = "SOMSOV_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SomSovConfig {
    #[serde(default)]
    pub agent: AgentSettings,

    #[serde(default)]
    pub analysis: AnalysisSettings,

    #[serde(default)]
    pub notifications: NotificationSettings,
}

/// Where and how to reach the agent service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentSettings {
    pub endpoint: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
        }
    }
}

/// Defaults for a market analysis run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    pub market_name: String,

    /// Pre-filled analysis period (e.g. "Monthly")
    pub default_period: String,

    /// Animate the researching/recommending steps after the call returns
    pub simulate_progress: bool,

    /// Delay per animated step, in milliseconds
    pub step_delay_ms: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            market_name: DEFAULT_MARKET_NAME.to_string(),
            default_period: String::new(),
            simulate_progress: true,
            step_delay_ms: 1000,
        }
    }
}

impl AnalysisSettings {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

/// Notification preferences (shown and edited in the settings screen)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotificationSettings {
    pub notify_on_complete: bool,
    pub alert_on_significant_change: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            notify_on_complete: true,
            alert_on_significant_change: false,
        }
    }
}

impl SomSovConfig {
    /// Get the config directory path
    ///
    /// Returns `~/.config/somsov/` on Unix, `%APPDATA%/somsov/` on Windows
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("somsov")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Log file used while the dashboard owns the terminal
    pub fn log_path() -> PathBuf {
        Self::config_dir().join("somsov.log")
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a file
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns error if the file exists but is malformed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SomSovError::ConfigError {
            reason: format!("Failed to read config file: {}", e),
        })?;

        toml::from_str(&content).map_err(|e| SomSovError::ConfigError {
            reason: format!("Failed to parse config file: {}", e),
        })
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| SomSovError::ConfigError {
                reason: format!("Failed to create config directory: {}", e),
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| SomSovError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|e| SomSovError::ConfigError {
            reason: format!("Failed to write config file: {}", e),
        })?;

        Ok(())
    }

    /// Merge with process environment variables
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Merge with variables from `lookup`; empty values are ignored
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.is_empty()) {
            self.agent.endpoint = endpoint;
        }

        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.agent.api_key = Some(key);
        }

        self
    }

    /// Effective API key
    pub fn api_key(&self) -> Option<&str> {
        self.agent.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Validated agent endpoint
    pub fn endpoint(&self) -> Result<Url> {
        parse_endpoint(&self.agent.endpoint)
    }
}

/// Parse and check an agent endpoint (http/https only)
pub fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint).map_err(|e| SomSovError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SomSovError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// Mask an API key for display
///
/// Shows first N chars + asterisks, e.g. "sk-live-***"
pub fn mask_api_key(key: &str, visible_chars: usize) -> String {
    if key.is_empty() {
        return String::new();
    }

    let visible: String = key.chars().take(visible_chars).collect();
    format!("{}***", visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_path_contains_somsov() {
        let path = SomSovConfig::config_path();
        assert!(path.to_string_lossy().contains("somsov"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = SomSovConfig::default();
        assert_eq!(config.agent.endpoint, DEFAULT_ENDPOINT);
        assert!(config.api_key().is_none());
        assert_eq!(config.analysis.market_name, "Chocolate Snacking Market");
        assert!(config.analysis.simulate_progress);
        assert_eq!(config.analysis.step_delay(), Duration::from_secs(1));
        assert!(config.notifications.notify_on_complete);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = SomSovConfig::default();
        config.agent.api_key = Some("sk-live-123".into());
        config.analysis.default_period = "Monthly".into();
        config.notifications.alert_on_significant_change = true;

        config.save_to(&path).unwrap();
        assert_eq!(SomSovConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = SomSovConfig::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, SomSovConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[analysis]\nstep_delay_ms = 0\n").unwrap();

        let config = SomSovConfig::load_from(&path).unwrap();
        assert_eq!(config.analysis.step_delay_ms, 0);
        assert_eq!(config.analysis.market_name, DEFAULT_MARKET_NAME);
        assert_eq!(config.agent.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[agent\nendpoint = ").unwrap();

        assert!(matches!(
            SomSovConfig::load_from(&path),
            Err(SomSovError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_env_overrides_config() {
        let config = SomSovConfig::default().with_env_from(env(&[
            (ENV_ENDPOINT, "https://agents.example.com/run"),
            (ENV_API_KEY, "from-env"),
        ]));

        assert_eq!(config.agent.endpoint, "https://agents.example.com/run");
        assert_eq!(config.api_key(), Some("from-env"));
    }

    #[test]
    fn test_env_does_not_override_with_empty() {
        let mut base = SomSovConfig::default();
        base.agent.api_key = Some("from-config".into());

        let config = base.with_env_from(env(&[(ENV_API_KEY, ""), (ENV_ENDPOINT, "")]));
        assert_eq!(config.api_key(), Some("from-config"));
        assert_eq!(config.agent.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_parse_endpoint() {
        assert!(parse_endpoint("https://agents.example.com/api").is_ok());
        assert!(parse_endpoint("file:///etc/passwd").is_err());
        assert!(parse_endpoint("localhost:8000").is_err());
    }

    #[test]
    fn test_endpoint_validates_configured_value() {
        let mut config = SomSovConfig::default();
        assert_eq!(config.endpoint().unwrap().as_str(), DEFAULT_ENDPOINT);

        config.agent.endpoint = "localhost:8000".to_string();
        assert!(config.endpoint().is_err());
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("sk-live-abcdefghij", 8), "sk-live-***");
        assert_eq!(mask_api_key("short", 10), "short***");
        assert_eq!(mask_api_key("", 10), "");
    }

    #[test]
    fn test_toml_format() {
        let toml_str = toml::to_string_pretty(&SomSovConfig::default()).unwrap();
        assert!(toml_str.contains("[agent]"));
        assert!(toml_str.contains("[analysis]"));
        assert!(toml_str.contains("market_name = \"Chocolate Snacking Market\""));
        assert!(toml_str.contains("[notifications]"));
    }
}
