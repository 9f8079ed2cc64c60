use std::path::Path;

use tracing::{debug, warn};

use crate::ai::OpponentSpec;
use crate::error::ConfigError;
use crate::game::Player;
use crate::search::SearchOrder;

/// How searches are driven.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Overrides every task's default exploration order when set.
    pub order: Option<SearchOrder>,
    /// Upper bound on expansions per search; `None` runs to completion.
    pub max_steps: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            order: None,
            max_steps: Some(1_000_000),
        }
    }
}

/// Connect Four lookahead settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConnectFourConfig {
    pub favorable: Player,
    pub opponent: OpponentSpec,
    /// Seed for the random opponent; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for ConnectFourConfig {
    fn default() -> Self {
        ConnectFourConfig {
            favorable: Player::Yellow,
            opponent: OpponentSpec::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "pathless_search=info".into(),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub connect_four: ConnectFourConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Read, parse and validate a TOML file. Missing sections take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = toml::from_str(&text)?;
        config.validate()?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Reject values the solver cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_steps == Some(0) {
            return Err(ConfigError::Validation(
                "search.max_steps must be > 0".into(),
            ));
        }
        if let OpponentSpec::Fixed(col) = self.connect_four.opponent {
            if col >= crate::game::COLS {
                return Err(ConfigError::Validation(format!(
                    "connect_four.opponent fixed column {col} is off the board"
                )));
            }
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.filter must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// The default configuration rendered as TOML.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
