//! Application configuration.
//!
//! The board is configured from a single JSON file listing the widgets to
//! run, with a couple of environment overrides for secrets and local
//! development.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::widget::{WidgetConfig, WidgetId};

/// Environment variable holding the Darwin API token.
pub const TOKEN_ENV: &str = "DARWIN_API_KEY";

/// Environment variable pointing at a directory of mock boards.
pub const MOCK_DIR_ENV: &str = "BOARD_MOCK_DIR";

/// Errors from loading or validating configuration.
///
/// The widget-level variants double as the message shown in place of the
/// board, so their wording is user-facing.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Please set the Station Code.")]
    MissingStation,

    #[error("Please set the Darwin API token.")]
    MissingToken,

    #[error("Invalid station code: {code}")]
    InvalidCrs { code: String },

    #[error("Update interval must be greater than zero.")]
    ZeroInterval,

    #[error("duplicate widget id: {0}")]
    DuplicateId(String),
}

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Address the web server listens on.
    pub listen: SocketAddr,

    /// Directory of static assets (stylesheet).
    pub static_dir: PathBuf,

    /// How often the board page reloads itself, in seconds.
    pub refresh_secs: u32,

    /// Override for the Darwin API base URL.
    pub darwin_base_url: Option<String>,

    /// Serve boards from `{CRS}.json` files here instead of calling Darwin.
    pub mock_data_dir: Option<PathBuf>,

    /// Widgets to run, in display order.
    pub widgets: Vec<WidgetConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 8080)),
            static_dir: PathBuf::from("static"),
            refresh_secs: 30,
            darwin_base_url: None,
            mock_data_dir: None,
            widgets: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(TOKEN_ENV).ok(),
            std::env::var(MOCK_DIR_ENV).ok().map(PathBuf::from),
        )
    }

    /// Fill empty widget tokens from `token` and replace the mock directory.
    pub fn with_overrides(mut self, token: Option<String>, mock_dir: Option<PathBuf>) -> Self {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            for widget in self.widgets.iter_mut().filter(|w| w.token.is_empty()) {
                widget.token = token.clone();
            }
        }
        if mock_dir.is_some() {
            self.mock_data_dir = mock_dir;
        }
        self
    }

    /// Pair each widget with its instance id.
    ///
    /// Widgets without an explicit `id` are numbered by position.
    pub fn widget_instances(&self) -> Result<Vec<(WidgetId, WidgetConfig)>, ConfigError> {
        let mut seen = HashSet::new();
        self.widgets
            .iter()
            .enumerate()
            .map(|(i, config)| {
                let id = config
                    .id
                    .clone()
                    .map(WidgetId::new)
                    .unwrap_or_else(|| WidgetId::new(format!("board-{i}")));
                if !seen.insert(id.clone()) {
                    return Err(ConfigError::DuplicateId(id.to_string()));
                }
                Ok((id, config.clone()))
            })
            .collect()
    }
}
