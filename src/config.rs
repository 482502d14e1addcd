use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::form::FormTimings;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where submissions are posted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Origin the form was served from; redirects resolve against it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_submit_path")]
    pub submit_path: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_submit_path() -> String {
    "/submit-feedback".to_string()
}

fn default_user_agent() -> String {
    format!("feedback-form/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            submit_path: default_submit_path(),
            user_agent: default_user_agent(),
        }
    }
}

impl EndpointConfig {
    fn base(&self) -> Result<reqwest::Url> {
        reqwest::Url::parse(&self.base_url)
            .with_context(|| format!("Invalid endpoint base URL: {}", self.base_url))
    }

    /// Absolute URL of the submission endpoint
    pub fn submit_url(&self) -> Result<String> {
        let url = self
            .base()?
            .join(&self.submit_path)
            .with_context(|| format!("Invalid submit path: {}", self.submit_path))?;
        Ok(url.into())
    }

    /// Resolve a redirect target (relative or absolute) against the base URL
    pub fn resolve(&self, location: &str) -> Result<String> {
        let url = self
            .base()?
            .join(location)
            .with_context(|| format!("Invalid redirect location: {location}"))?;
        Ok(url.into())
    }

    /// Where to send the user after a successful submission. A location
    /// that does not resolve is passed through as the server sent it.
    pub fn redirect_target(&self, location: &str) -> String {
        match self.resolve(location) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(location, error = %format!("{err:#}"), "Could not resolve redirect");
                location.to_string()
            }
        }
    }
}

/// Controller delays, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Wait before following a success redirect (default: 3000)
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u64,
    /// Toast lifetime (default: 5000)
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u64,
    /// Shake animation on invalid fields (default: 500)
    #[serde(default = "default_shake_duration")]
    pub shake_duration_ms: u64,
    #[serde(default = "default_section_hide")]
    pub section_hide_ms: u64,
    #[serde(default = "default_section_fade_in")]
    pub section_fade_in_ms: u64,
}

fn default_redirect_delay() -> u64 {
    3000
}

fn default_toast_duration() -> u64 {
    5000
}

fn default_shake_duration() -> u64 {
    500
}

fn default_section_hide() -> u64 {
    300
}

fn default_section_fade_in() -> u64 {
    50
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay(),
            toast_duration_ms: default_toast_duration(),
            shake_duration_ms: default_shake_duration(),
            section_hide_ms: default_section_hide(),
            section_fade_in_ms: default_section_fade_in(),
        }
    }
}

impl TimingConfig {
    pub fn to_timings(&self) -> FormTimings {
        FormTimings {
            redirect_delay: Duration::from_millis(self.redirect_delay_ms),
            toast_duration: Duration::from_millis(self.toast_duration_ms),
            shake_duration: Duration::from_millis(self.shake_duration_ms),
            section_hide: Duration::from_millis(self.section_hide_ms),
            section_fade_in: Duration::from_millis(self.section_fade_in_ms),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Terminal poll interval
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

fn default_tick_rate() -> u64 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,

    /// Directory for log files; defaults to the platform data directory
    #[serde(default)]
    pub dir: Option<String>,
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
            dir: None,
        }
    }
}

impl Config {
    /// User config in ~/.config/feedback-form/
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("feedback-form").join("config.toml"))
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the form works without config files
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

        // Environment variables, e.g. FEEDBACK_FORM__ENDPOINT__BASE_URL
        builder = builder.add_source(
            config::Environment::with_prefix("FEEDBACK_FORM")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Save config to ~/.config/feedback-form/config.toml
    pub fn save(&self) -> Result<PathBuf> {
        let config_path =
            Self::user_config_path().context("No config directory on this platform")?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(config_path, toml_str).context("Failed to write config file")?;

        Ok(())
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        match &self.logging.dir {
            Some(dir) => {
                let path = PathBuf::from(dir);
                if path.is_absolute() {
                    path
                } else {
                    std::env::current_dir().unwrap_or_default().join(path)
                }
            }
            None => dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("feedback-form")
                .join("logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_submit_url() {
        let config = Config::default();
        assert_eq!(
            config.endpoint.submit_url().unwrap(),
            "http://127.0.0.1:5000/submit-feedback"
        );
    }

    #[test]
    fn test_resolve_relative_and_absolute_redirects() {
        let endpoint = EndpointConfig {
            base_url: "https://feedback.example.com/".to_string(),
            ..EndpointConfig::default()
        };
        assert_eq!(
            endpoint.resolve("/success").unwrap(),
            "https://feedback.example.com/success"
        );
        assert_eq!(
            endpoint.resolve("https://other.example.com/thanks").unwrap(),
            "https://other.example.com/thanks"
        );
    }

    #[test]
    fn test_malformed_redirect_falls_back_to_raw_location() {
        let endpoint = EndpointConfig::default();
        assert!(endpoint.resolve("http://[bad").is_err());
        assert_eq!(endpoint.redirect_target("http://[bad"), "http://[bad");
        assert_eq!(
            endpoint.redirect_target("/success"),
            "http://127.0.0.1:5000/success"
        );
    }

    #[test]
    fn test_invalid_base_url_is_error() {
        let endpoint = EndpointConfig {
            base_url: "not a url".to_string(),
            ..EndpointConfig::default()
        };
        assert!(endpoint.submit_url().is_err());
    }

    #[test]
    fn test_default_timings_match_form_defaults() {
        assert_eq!(TimingConfig::default().to_timings(), FormTimings::default());
    }

    #[test]
    fn test_load_explicit_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("form.toml");
        std::fs::write(
            &path,
            "[endpoint]\nbase_url = \"http://localhost:8080\"\n\n[timing]\nredirect_delay_ms = 10\n",
        )
        .unwrap();

        let config = Config::load(Some(path.to_str().unwrap())).unwrap();

        assert_eq!(config.endpoint.base_url, "http://localhost:8080");
        assert_eq!(config.endpoint.submit_path, "/submit-feedback");
        assert_eq!(config.timing.redirect_delay_ms, 10);
        assert_eq!(config.timing.toast_duration_ms, 5000);
    }

    #[test]
    fn test_save_to_writes_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.logging.level = "debug".to_string();

        config.save_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Config = toml::from_str(&written).unwrap();
        assert_eq!(parsed.logging.level, "debug");
        assert_eq!(parsed.endpoint.submit_path, "/submit-feedback");
    }

    #[test]
    fn test_logs_path_uses_configured_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.logging.dir = Some(temp_dir.path().to_string_lossy().to_string());
        assert_eq!(config.logs_path(), temp_dir.path());
    }
}
