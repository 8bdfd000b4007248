//! Game configuration.
//!
//! `GameConfig` carries the choices that are not rules: who starts, how the
//! dice are seeded, the static commentary texts and the presentation delays
//! front ends wait for before showing a result. Every field has a default, so
//! a TOML file only needs the keys it wants to change.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::ConfigError;

/// Upper bound for any presentation delay.
pub const MAX_DELAY_MS: u64 = 10_000;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Colour that rolls first.
    pub starting_color: Color,

    /// Dice seed. `None` seeds from OS entropy.
    pub dice_seed: Option<u64>,

    /// Commentary shown before the first move.
    pub welcome_commentary: String,

    /// Commentary shown when the collaborator fails or is unavailable.
    pub fallback_commentary: String,

    /// Delay while the die "rolls".
    pub roll_delay_ms: u64,

    /// Delay before announcing a bonus turn.
    pub bonus_delay_ms: u64,

    /// Delay before handing over after a roll with no legal move.
    pub pass_delay_ms: u64,

    /// Game log lines kept by a session (oldest dropped first).
    pub max_log_entries: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_color: Color::Blue,
            dice_seed: None,
            welcome_commentary: "Welcome to Ludo!".to_string(),
            fallback_commentary: "The game heats up!".to_string(),
            roll_delay_ms: 600,
            bonus_delay_ms: 500,
            pass_delay_ms: 1000,
            max_log_entries: 200,
        }
    }
}

impl GameConfig {
    /// Set the starting colour.
    #[must_use]
    pub fn with_starting_color(mut self, color: Color) -> Self {
        self.starting_color = color;
        self
    }

    /// Set a fixed dice seed.
    #[must_use]
    pub fn with_dice_seed(mut self, seed: u64) -> Self {
        self.dice_seed = Some(seed);
        self
    }

    /// Set the fallback commentary text.
    #[must_use]
    pub fn with_fallback_commentary(mut self, text: impl Into<String>) -> Self {
        self.fallback_commentary = text.into();
        self
    }

    /// Disable all presentation delays (tests, headless runs).
    #[must_use]
    pub fn without_delays(mut self) -> Self {
        self.roll_delay_ms = 0;
        self.bonus_delay_ms = 0;
        self.pass_delay_ms = 0;
        self
    }

    /// Set the game log capacity.
    #[must_use]
    pub fn with_max_log_entries(mut self, max: usize) -> Self {
        self.max_log_entries = max;
        self
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no front end can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.welcome_commentary.trim().is_empty() {
            return Err(ConfigError::Validation(
                "welcome_commentary must not be empty".to_string(),
            ));
        }
        if self.fallback_commentary.trim().is_empty() {
            return Err(ConfigError::Validation(
                "fallback_commentary must not be empty".to_string(),
            ));
        }
        for (name, value) in [
            ("roll_delay_ms", self.roll_delay_ms),
            ("bonus_delay_ms", self.bonus_delay_ms),
            ("pass_delay_ms", self.pass_delay_ms),
        ] {
            if value > MAX_DELAY_MS {
                return Err(ConfigError::Validation(format!(
                    "{name} must be at most {MAX_DELAY_MS}, got {value}"
                )));
            }
        }
        if self.max_log_entries == 0 {
            return Err(ConfigError::Validation(
                "max_log_entries must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.starting_color, Color::Blue);
        assert_eq!(config.dice_seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::default()
            .with_starting_color(Color::Green)
            .with_dice_seed(9)
            .with_fallback_commentary("What a move!")
            .with_max_log_entries(10)
            .without_delays();

        assert_eq!(config.starting_color, Color::Green);
        assert_eq!(config.dice_seed, Some(9));
        assert_eq!(config.fallback_commentary, "What a move!");
        assert_eq!(config.max_log_entries, 10);
        assert_eq!(config.roll_delay_ms, 0);
        assert_eq!(config.pass_delay_ms, 0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GameConfig::from_toml(
            r#"
            starting_color = "Red"
            dice_seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.starting_color, Color::Red);
        assert_eq!(config.dice_seed, Some(7));
        assert_eq!(config.roll_delay_ms, 600);
    }

    #[test]
    fn test_invalid_toml() {
        let err = GameConfig::from_toml("starting_color = \"Purple\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let err = GameConfig::from_toml("fallback_commentary = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = GameConfig::from_toml("bonus_delay_ms = 60000").unwrap_err();
        assert_eq!(
            err.to_string(),
            "config validation error: bonus_delay_ms must be at most 10000, got 60000"
        );

        let config = GameConfig::default().with_max_log_entries(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let path = Path::new("definitely/not/here/ludo.toml");

        assert!(matches!(
            GameConfig::load(path),
            Err(ConfigError::FileRead { .. })
        ));
        assert_eq!(GameConfig::load_or_default(path).unwrap(), GameConfig::default());
    }
}
