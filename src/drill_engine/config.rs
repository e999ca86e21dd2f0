use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::drill_engine::error::{ConfigError, ValidationError};

/// Storage key the statistics blob lives under.
pub const DEFAULT_STATS_KEY: &str = "cardGameStats";

/// Root configuration. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillConfig {
    pub timer: TimerConfig,
    pub rounds: RoundConfig,
    pub stats_key: String,
}

impl Default for DrillConfig {
    fn default() -> Self {
        DrillConfig {
            timer: TimerConfig::default(),
            rounds: RoundConfig::default(),
            stats_key: DEFAULT_STATS_KEY.to_string(),
        }
    }
}

impl DrillConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: DrillConfig = serde_json::from_str(text)
            .map_err(|source| ConfigError::Parse { source, path: None })?;
        cfg.validate()
            .map_err(|source| ConfigError::Invalid { source, path: None })?;
        Ok(cfg)
    }

    /// Load configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_buf: PathBuf = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path_buf).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let cfg: DrillConfig = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            source,
            path: Some(path_buf.clone()),
        })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            source,
            path: Some(path_buf),
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.timer.validate()?;
        self.rounds.validate()?;
        if self.stats_key.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "stats_key".to_string(),
                message: "storage key must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Countdown and difficulty-adaptation settings. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub initial_base_time: f64,
    pub min_base_time: f64,
    pub max_base_time: f64,
    /// Amount `base_time` moves after a streak or a miss.
    pub step: f64,
    /// Correct answers in a row needed before the budget tightens.
    pub streak_length: u32,
    /// Wall-clock length of one countdown tick, in milliseconds.
    pub tick_millis: u64,
    /// Remaining time at or below which the display turns urgent.
    pub warning_threshold: f64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            initial_base_time: 7.0,
            min_base_time: 2.0,
            max_base_time: 15.0,
            step: 0.1,
            streak_length: 2,
            tick_millis: 100,
            warning_threshold: 1.5,
        }
    }
}

impl TimerConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |field: &str, message: &str| ValidationError::InvalidField {
            field: format!("timer.{field}"),
            message: message.to_string(),
        };

        if !(self.min_base_time > 0.0) {
            return Err(invalid("min_base_time", "must be greater than zero"));
        }
        if self.min_base_time > self.max_base_time {
            return Err(invalid("min_base_time", "must not exceed max_base_time"));
        }
        if !(self.min_base_time..=self.max_base_time).contains(&self.initial_base_time) {
            return Err(invalid(
                "initial_base_time",
                "must lie between min_base_time and max_base_time",
            ));
        }
        if !(self.step > 0.0) {
            return Err(invalid("step", "must be greater than zero"));
        }
        if self.streak_length == 0 {
            return Err(invalid("streak_length", "must be at least 1"));
        }
        if self.tick_millis == 0 {
            return Err(invalid("tick_millis", "must be at least 1"));
        }
        if self.warning_threshold < 0.0 {
            return Err(invalid("warning_threshold", "must not be negative"));
        }
        Ok(())
    }
}

/// Round-type selection as cumulative bounds on a uniform draw `r` in `[0, 1)`:
/// `r < sum_below` is a sum round, `r < double_below` a double round, anything
/// else single. Defaults give 10% sum, 20% double, 70% single.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub sum_below: f64,
    pub double_below: f64,
}

impl Default for RoundConfig {
    fn default() -> Self {
        RoundConfig {
            sum_below: 0.10,
            double_below: 0.30,
        }
    }
}

impl RoundConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, bound) in [("sum_below", self.sum_below), ("double_below", self.double_below)] {
            if !(0.0..=1.0).contains(&bound) {
                return Err(ValidationError::InvalidField {
                    field: format!("rounds.{field}"),
                    message: "bound must lie in [0, 1]".to_string(),
                });
            }
        }
        if self.sum_below > self.double_below {
            return Err(ValidationError::InvalidField {
                field: "rounds".to_string(),
                message: "sum_below must not exceed double_below".to_string(),
            });
        }
        Ok(())
    }
}
