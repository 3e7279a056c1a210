// src/config.rs
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::SaveLoadError;
use crate::types::PieceKind;

pub const DEFAULT_CONFIG_FILENAME: &str = "chess_rules.json";
const DEFAULT_HISTORY_FILENAME: &str = "chess_history.json";

/// Settings read from a JSON file. Missing keys take their defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// What a pawn becomes when no promotion choice is supplied.
    pub default_promotion: PieceKind,
    /// Where the demo saves move history.
    pub history_file: String,
    /// Seed for the demo's random-move command.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_promotion: PieceKind::Queen,
            history_file: DEFAULT_HISTORY_FILENAME.to_string(),
            seed: 0xDEADBEEFCAFEBABE,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Config, SaveLoadError> {
        let config: Config = serde_json::from_str(json)?;
        if !config.default_promotion.is_promotion_target() {
            return Err(SaveLoadError::InvalidConfig(
                format!("default_promotion cannot be {:?}", config.default_promotion)));
        }
        Ok(config)
    }

    pub fn load(path: &str) -> Result<Config, SaveLoadError> {
        let json = fs::read_to_string(path).map_err(|e| SaveLoadError::io(path, e))?;
        Config::from_json(&json)
    }

    /// Loads `path`, falling back to defaults (with a warning) if it is
    /// missing or malformed.
    pub fn load_or_default(path: &str) -> Config {
        match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Using default config: {}", e);
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = Config::from_json(r#"{ "default_promotion": "knight" }"#).unwrap();
        assert_eq!(config.default_promotion, PieceKind::Knight);
        assert_eq!(config.history_file, DEFAULT_HISTORY_FILENAME);
        assert_eq!(config.seed, Config::default().seed);
    }

    #[test]
    fn king_is_not_a_valid_default_promotion() {
        let err = Config::from_json(r#"{ "default_promotion": "king" }"#).unwrap_err();
        assert!(matches!(err, SaveLoadError::InvalidConfig(_)));
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let config = Config::load_or_default("/nonexistent/chess_rules.json");
        assert_eq!(config, Config::default());
    }
}
