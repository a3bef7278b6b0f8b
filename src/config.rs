//! Game configuration: which move source plays each color.

use crate::games::ataxx::{Color, JumpRule};
use crate::players::{HumanInput, HumanPlayer, MoveSource, PlayerType, RandomAgent, RemoteAgent};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Configuration of one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PlayerConfig {
    /// A person at the keyboard.
    Human {
        /// Display name.
        #[serde(default = "default_human_name")]
        name: String,
    },
    /// The in-process random agent.
    LocalAgent {
        /// Fixed RNG seed; entropy when absent.
        #[serde(default)]
        seed: Option<u64>,
    },
    /// A bot reached over HTTP.
    ServerBot {
        /// Endpoint receiving move requests.
        url: String,
        /// Request timeout in milliseconds; none when absent.
        #[serde(default)]
        timeout_ms: Option<u64>,
    },
}

fn default_human_name() -> String {
    "Player".to_string()
}

fn default_white() -> PlayerConfig {
    PlayerConfig::Human {
        name: default_human_name(),
    }
}

fn default_black() -> PlayerConfig {
    PlayerConfig::LocalAgent { seed: None }
}

/// A built move source, plus the input sender for human seats.
pub type BuiltSource = (Box<dyn MoveSource>, Option<mpsc::UnboundedSender<HumanInput>>);

impl PlayerConfig {
    /// The kind of source this seat uses.
    pub fn player_type(&self) -> PlayerType {
        match self {
            PlayerConfig::Human { .. } => PlayerType::Human,
            PlayerConfig::LocalAgent { .. } => PlayerType::LocalAgent,
            PlayerConfig::ServerBot { .. } => PlayerType::ServerBot,
        }
    }

    /// Builds the move source for `color`.
    ///
    /// Human seats also return the sender that feeds them clicks.
    #[instrument(skip(self), fields(kind = %self.player_type()))]
    pub fn build(&self, color: Color) -> Result<BuiltSource, ConfigError> {
        match self {
            PlayerConfig::Human { name } => {
                let (human, tx) = HumanPlayer::with_channel(name.clone(), color);
                Ok((Box::new(human), Some(tx)))
            }
            PlayerConfig::LocalAgent { seed } => {
                let name = format!("Random agent ({})", color);
                let agent = match seed {
                    Some(seed) => RandomAgent::with_seed(name, color, *seed),
                    None => RandomAgent::new(name, color),
                };
                Ok((Box::new(agent), None))
            }
            PlayerConfig::ServerBot { url, timeout_ms } => {
                let agent = RemoteAgent::new(
                    format!("Server bot ({})", color),
                    color,
                    url.clone(),
                    timeout_ms.map(Duration::from_millis),
                )
                .map_err(|e| ConfigError::new(format!("Failed to create remote agent: {}", e)))?;
                Ok((Box::new(agent), None))
            }
        }
    }
}

/// Configuration for one game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Jump table used by the board.
    #[serde(default)]
    jump_rule: JumpRule,

    /// White's seat (moves first).
    #[serde(default = "default_white")]
    white: PlayerConfig,

    /// Black's seat.
    #[serde(default = "default_black")]
    black: PlayerConfig,
}

impl GameConfig {
    /// Creates a configuration.
    pub fn new(jump_rule: JumpRule, white: PlayerConfig, black: PlayerConfig) -> Self {
        Self {
            jump_rule,
            white,
            black,
        }
    }

    /// Seat configuration for a color.
    pub fn seat(&self, color: Color) -> &PlayerConfig {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            white = %config.white.player_type(),
            black = %config.black.player_type(),
            jump_rule = %config.jump_rule,
            "Config loaded successfully"
        );
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(JumpRule::default(), default_white(), default_black())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_full_config() {
        let config = GameConfig::from_toml(
            r#"
            jump_rule = "extended"

            [white]
            kind = "human"
            name = "Alice"

            [black]
            kind = "server-bot"
            url = "http://127.0.0.1:3000/move"
            timeout_ms = 2500
            "#,
        )
        .unwrap();

        assert_eq!(*config.jump_rule(), JumpRule::Extended);
        assert_eq!(
            config.white(),
            &PlayerConfig::Human {
                name: "Alice".to_string()
            }
        );
        assert_eq!(config.seat(Color::Black).player_type(), PlayerType::ServerBot);
    }

    #[test]
    fn test_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.white().player_type(), PlayerType::Human);
        assert_eq!(config.black().player_type(), PlayerType::LocalAgent);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = GameConfig::from_toml("[white]\nkind = \"robot\"\n").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[black]\nkind = \"local-agent\"\nseed = 9").unwrap();
        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.black(), &PlayerConfig::LocalAgent { seed: Some(9) });
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }

    #[test]
    fn test_build_sources() {
        let (human, tx) = PlayerConfig::Human {
            name: "Alice".to_string(),
        }
        .build(Color::White)
        .unwrap();
        assert_eq!(human.player_type(), PlayerType::Human);
        assert_eq!(human.color(), Color::White);
        assert!(tx.is_some());

        let (agent, tx) = PlayerConfig::LocalAgent { seed: Some(1) }
            .build(Color::Black)
            .unwrap();
        assert_eq!(agent.player_type(), PlayerType::LocalAgent);
        assert_eq!(agent.color(), Color::Black);
        assert!(tx.is_none());
    }
}
