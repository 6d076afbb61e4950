//! Simulation runner configuration.
//!
//! Small YAML schema consumed by `bg sim`. Command-line flags override
//! file values; every field has a default so an empty file loads.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Settings for a `bg sim` run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimConfig {
    /// Number of games to play.
    #[serde(default = "default_games")]
    pub games: u32,
    /// Base seed for dice generation.
    #[serde(default)]
    pub seed: u64,
    /// If true, use the event-keyed deterministic dice stream; otherwise
    /// a per-game seeded PRNG stream.
    #[serde(default = "default_deterministic_chance")]
    pub deterministic_chance: bool,
    /// Flush NDJSON logs every N lines (0 disables periodic flushing).
    #[serde(default = "default_log_flush_every")]
    pub log_flush_every: u64,
}

fn default_games() -> u32 {
    100
}

fn default_deterministic_chance() -> bool {
    true
}

fn default_log_flush_every() -> u64 {
    100
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            games: default_games(),
            seed: 0,
            deterministic_chance: default_deterministic_chance(),
            log_flush_every: default_log_flush_every(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_yaml_string_with_defaults() {
        let yaml = r#"
games: 25
seed: 7
"#;
        let config = SimConfig::from_yaml(yaml).expect("Failed to parse YAML");
        assert_eq!(config.games, 25);
        assert_eq!(config.seed, 7);
        // Defaults apply to omitted fields.
        assert!(config.deterministic_chance);
        assert_eq!(config.log_flush_every, 100);
    }

    #[test]
    fn default_matches_serde_defaults() {
        let from_empty = SimConfig::from_yaml("{}").unwrap();
        let built = SimConfig::default();
        assert_eq!(from_empty.games, built.games);
        assert_eq!(from_empty.seed, built.seed);
        assert_eq!(from_empty.deterministic_chance, built.deterministic_chance);
        assert_eq!(from_empty.log_flush_every, built.log_flush_every);
    }

    #[test]
    fn invalid_yaml_fails() {
        let invalid_yaml = "games: [not a number";
        assert!(SimConfig::from_yaml(invalid_yaml).is_err());
    }
}
