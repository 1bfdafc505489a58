use crate::game::MatchConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const MIN_BOARD_SIZE: usize = 4;
pub const MAX_BOARD_SIZE: usize = 26;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board size {0} is outside 4..=26")]
    BoardSize(usize),
    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub board_size: usize,
    pub move_timeout_ms: u64,
    /// Matches per unordered pair; colors alternate between trials.
    pub trials: usize,
    /// Matches allowed to run at the same time.
    pub parallel: usize,
    pub seed: Option<u64>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            board_size: 8,
            move_timeout_ms: 2000,
            trials: 2,
            parallel: 1,
            seed: None,
        }
    }
}

impl TournamentConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: TournamentConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Defaults when the file does not exist; a file that exists but does not
    /// parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        if self.move_timeout_ms == 0 {
            return Err(ConfigError::Zero("move_timeout_ms"));
        }
        if self.trials == 0 {
            return Err(ConfigError::Zero("trials"));
        }
        if self.parallel == 0 {
            return Err(ConfigError::Zero("parallel"));
        }
        Ok(())
    }

    pub fn move_timeout(&self) -> Duration {
        Duration::from_millis(self.move_timeout_ms)
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            board_size: self.board_size,
            move_timeout: self.move_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: TournamentConfig =
            serde_json::from_str(r#"{ "board_size": 6, "seed": 9 }"#).unwrap();
        assert_eq!(config.board_size, 6);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.move_timeout_ms, 2000);
        assert_eq!(config.trials, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation() {
        let ok = TournamentConfig::default();
        assert_eq!(ok.validate(), Ok(()));
        assert_eq!(ok.match_config(), MatchConfig::default());

        let small = TournamentConfig { board_size: 3, ..ok.clone() };
        assert_eq!(small.validate(), Err(ConfigError::BoardSize(3)));
        let no_trials = TournamentConfig { trials: 0, ..ok.clone() };
        assert_eq!(no_trials.validate(), Err(ConfigError::Zero("trials")));
        let no_time = TournamentConfig { move_timeout_ms: 0, ..ok };
        assert!(no_time.validate().is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = TournamentConfig::load_or_default("does/not/exist.json").unwrap();
        assert_eq!(config, TournamentConfig::default());
        assert!(TournamentConfig::load("does/not/exist.json").is_err());
    }
}
