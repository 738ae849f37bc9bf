//! Конфигурация бота: JSON-файл рядом с бинарником (`config.json`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Chips;
use crate::engine::DealerPolicy;

/// Уровни логирования, которые понимает `tracing`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось прочитать конфиг: {0}")]
    Io(#[from] io::Error),

    #[error("Конфиг не является корректным JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Некорректный конфиг: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Токен бота для чат-платформы (подключение: вне движка).
    #[serde(alias = "Token")]
    pub token: Option<String>,

    /// Путь к файлу с таблицей игроков.
    #[serde(alias = "DbPath")]
    pub db_path: PathBuf,

    pub starting_chips: u64,

    pub dealer_policy: DealerPolicy,

    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            db_path: PathBuf::from("casino.json"),
            starting_chips: Chips::STARTING.0,
            dealer_policy: DealerPolicy::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Прочитать и проверить конфиг.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if Chips(self.starting_chips) < Chips::MIN {
            return Err(ConfigError::Invalid(format!(
                "starting_chips должно быть не меньше {}",
                Chips::MIN
            )));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "неизвестный log_level: {}",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn starting_chips(&self) -> Chips {
        Chips(self.starting_chips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = Config::from_json("{}").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.starting_chips(), Chips(50));
        assert_eq!(cfg.dealer_policy, DealerPolicy::HitSoft17);
    }

    #[test]
    fn accepts_legacy_field_names() {
        let cfg = Config::from_json(r#"{"Token": "abc", "DbPath": "players.json"}"#).unwrap();
        assert_eq!(cfg.token.as_deref(), Some("abc"));
        assert_eq!(cfg.db_path, PathBuf::from("players.json"));
    }

    #[test]
    fn parses_dealer_policy() {
        let cfg = Config::from_json(r#"{"dealer_policy": "head_to_head"}"#).unwrap();
        assert_eq!(cfg.dealer_policy, DealerPolicy::HeadToHead);
    }

    #[test]
    fn rejects_zero_starting_chips() {
        let err = Config::from_json(r#"{"starting_chips": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let err = Config::from_json(r#"{"log_level": "loud"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
