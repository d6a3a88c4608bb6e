//! Layered configuration: embedded defaults, user config file, `PLAZA_`
//! environment variables, then an explicit `--config` path.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the marketplace REST backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.plaza.example/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Background refresh cadence. The original product polled notifications
/// every 10s and chats every 5s; both are configurable here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_notifications_interval")]
    pub notifications_interval_secs: u64,
    #[serde(default = "default_chats_interval")]
    pub chats_interval_secs: u64,
}

fn default_notifications_interval() -> u64 {
    10
}

fn default_chats_interval() -> u64 {
    5
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            notifications_interval_secs: default_notifications_interval(),
            chats_interval_secs: default_chats_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw tick in milliseconds.
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate_ms: u64,
    /// Page size for the listings browser.
    #[serde(default = "default_page_size")]
    pub listings_page_size: u32,
}

fn default_refresh_rate() -> u64 {
    250
}

fn default_page_size() -> u32 {
    20
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate(),
            listings_page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to log to file in TUI mode (false = stderr for debugging).
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// State directory for session, logs. Empty = platform default
    /// (`~/.local/share/plaza` on Linux).
    #[serde(default)]
    pub state: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: String::new(),
        }
    }
}

impl Config {
    /// Default user config location (`~/.config/plaza/config.toml`).
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("plaza").join("config.toml"))
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so plaza works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with PLAZA_ prefix, e.g. PLAZA_API__BASE_URL
        builder = builder.add_source(
            config::Environment::with_prefix("PLAZA")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Save config to the user config path, creating parents as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::user_config_path().context("No config directory on this platform")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        std::fs::write(&path, raw)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Resolved state directory: configured path, or the platform data dir.
    pub fn state_dir(&self) -> PathBuf {
        if self.paths.state.is_empty() {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("plaza")
        } else {
            PathBuf::from(&self.paths.state)
        }
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_original_polling_cadence() {
        let config = Config::default();
        assert_eq!(config.polling.notifications_interval_secs, 10);
        assert_eq!(config.polling.chats_interval_secs, 5);
    }

    #[test]
    fn state_dir_prefers_configured_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.state = temp_dir.path().to_string_lossy().to_string();
        assert_eq!(config.state_dir(), temp_dir.path());
        assert!(config.logs_dir().ends_with("logs"));
    }

    #[test]
    fn explicit_config_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plaza.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://localhost:8000/api\"\n[polling]\nchats_interval_secs = 2\n",
        )
        .unwrap();

        let config = Config::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.polling.chats_interval_secs, 2);
        // Untouched sections keep their defaults
        assert_eq!(config.polling.notifications_interval_secs, 10);
        assert_eq!(config.ui.refresh_rate_ms, 250);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let raw = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.api.base_url, config.api.base_url);
        assert_eq!(parsed.logging.level, "info");
    }
}
