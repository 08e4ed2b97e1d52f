//! Application configuration.
//!
//! Read from a TOML file:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [timeline]
//! start_hour = 8
//! end_hour = 24
//! step_minutes = 15
//!
//! [catalog]
//! seed_path = "data/catalog.json"
//! ```
//!
//! Every section and key is optional. `HOST` and `PORT` environment
//! variables override the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::timeline::TimelineWindow;

/// File names searched by [`AppConfig::from_default_location`], in order.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["fest-schedule.toml", "config/fest-schedule.toml"];

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub timeline: TimelineSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Visible timeline window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSettings {
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,
}

/// Catalog source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// JSON seed with venues, works and groups. Empty catalog when unset.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_start_hour() -> u32 {
    TimelineWindow::DEFAULT_START_HOUR
}

fn default_end_hour() -> u32 {
    TimelineWindow::DEFAULT_END_HOUR
}

fn default_step_minutes() -> u32 {
    TimelineWindow::DEFAULT_STEP_MINUTES
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            step_minutes: default_step_minutes(),
        }
    }
}

impl TimelineSettings {
    /// Validated timeline window.
    pub fn window(&self) -> Result<TimelineWindow, ConfigError> {
        TimelineWindow::new(self.start_hour, self.end_hour, self.step_minutes)
    }
}

impl AppConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.timeline.window()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// `Read` if the file cannot be read, `Parse` if it is not valid TOML,
    /// `InvalidWindow` if the timeline section is inconsistent.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Loads the first config file found in [`DEFAULT_CONFIG_PATHS`], or
    /// defaults when none exists.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        for candidate in DEFAULT_CONFIG_PATHS {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Applies `HOST` / `PORT` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies `HOST` / `PORT` overrides from an arbitrary lookup.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { key: "PORT", value: port })?;
        }
        Ok(self)
    }

    /// `host:port` bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
