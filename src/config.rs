//! Engine configuration loaded from TOML.
//!
//! ```toml
//! [session]
//! answer_feedback_ms = 1000
//! daily_test_flash_ms = 1500
//! memory_flash_ms = 500
//! poker_flash_ms = 4000
//! ```
//!
//! Every key is optional. The file path comes from `BRAIN_TRAINER_CONFIG`;
//! a missing or broken file is logged and the defaults are used.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

use crate::error::ConfigError;

pub const CONFIG_ENV: &str = "BRAIN_TRAINER_CONFIG";

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub session: SessionSettings,
}

/// Session pacing, in milliseconds.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionSettings {
    /// Pause after an answer before the next round.
    pub answer_feedback_ms: u64,
    /// Flash time forced for every daily test question.
    pub daily_test_flash_ms: u64,
    /// Default flash time for the memorisation games.
    pub memory_flash_ms: u64,
    /// Default per-street reveal time for poker deals.
    pub poker_flash_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            answer_feedback_ms: 1000,
            daily_test_flash_ms: 1500,
            memory_flash_ms: 500,
            poker_flash_ms: 4000,
        }
    }
}

impl SessionSettings {
    pub fn answer_feedback(&self) -> Duration {
        Duration::from_millis(self.answer_feedback_ms)
    }

    pub fn daily_test_flash(&self) -> Duration {
        Duration::from_millis(self.daily_test_flash_ms)
    }

    pub fn memory_flash(&self) -> Duration {
        Duration::from_millis(self.memory_flash_ms)
    }

    pub fn poker_flash(&self) -> Duration {
        Duration::from_millis(self.poker_flash_ms)
    }
}

impl EngineConfig {
    pub fn from_toml(raw: &str) -> Result<EngineConfig, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `BRAIN_TRAINER_CONFIG`, falling back to defaults.
    pub fn load_from_env() -> EngineConfig {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            return EngineConfig::default();
        };
        match Self::load(&path) {
            Ok(cfg) => {
                info!(target: "session", %path, "loaded engine config");
                cfg
            }
            Err(e) => {
                error!(target: "session", %path, error = %e, "failed to load engine config, using defaults");
                EngineConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg = EngineConfig::from_toml("[session]\nmemory_flash_ms = 800\n").unwrap();
        assert_eq!(cfg.session.memory_flash(), Duration::from_millis(800));
        assert_eq!(cfg.session.answer_feedback(), Duration::from_secs(1));
        assert_eq!(cfg.session.poker_flash_ms, 4000);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(EngineConfig::from_toml("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn bad_values_are_parse_errors() {
        assert!(EngineConfig::from_toml("[session]\nmemory_flash_ms = \"fast\"\n").is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = EngineConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
