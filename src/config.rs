//! Engine configuration.
//!
//! Every threshold the engine applies lives here with its committee-tuned
//! default, so deployments can adjust them without code changes.
//!
//! # Examples
//!
//! ```
//! use u_timetable::config::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     [checker]
//!     capacity_error_ratio = 0.25
//!
//!     [resolution]
//!     auto_resolve_min_score = 85
//!     policy = "best_score"
//!
//!     [generator]
//!     section_capacity = 40
//! "#).unwrap();
//!
//! assert_eq!(config.checker.auto_resolve_max_overage, 5);
//! assert_eq!(config.resolution.auto_resolve_min_score, 85);
//! assert_eq!(config.generator.section_capacity, 40);
//! ```

use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::time_slot::hm;
use crate::models::Day;
use crate::resolution::catalog::{default_days, default_rooms, default_time_blocks, Room, TimeBlock};

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Conflict detection thresholds.
    pub checker: CheckerConfig,
    /// Resolution catalogs and scoring.
    pub resolution: ResolutionConfig,
    /// Capacity planning.
    pub generator: GeneratorConfig,
}

impl EngineConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Checks cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.checker.validate()?;
        self.resolution.validate()?;
        self.generator.validate()
    }
}

/// Conflict checker thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Overage ratio above which a capacity conflict is an error (0.20 = 20%).
    pub capacity_error_ratio: f64,
    /// Largest overage (seats) still fixable by moving rooms.
    pub auto_resolve_max_overage: u32,
    /// Daily teaching-hour limit used by `ConflictChecker::detect_all_configured`;
    /// `None` skips the daily load check.
    pub max_daily_hours: Option<f64>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            capacity_error_ratio: 0.20,
            auto_resolve_max_overage: 5,
            max_daily_hours: Some(6.0),
        }
    }
}

impl CheckerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity_error_ratio.is_nan() || self.capacity_error_ratio < 0.0 {
            return Err(ConfigError::Invalid(
                "checker.capacity_error_ratio must be non-negative".into(),
            ));
        }
        if let Some(h) = self.max_daily_hours {
            if h.is_nan() || h <= 0.0 || h > 24.0 {
                return Err(ConfigError::Invalid(format!(
                    "checker.max_daily_hours must be in (0, 24], got {h}"
                )));
            }
        }
        Ok(())
    }
}

/// Which auto-resolvable option `auto_resolve_conflict` picks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoResolvePolicy {
    /// First auto-resolvable option in generation order.
    #[default]
    FirstGenerated,
    /// Highest-scored auto-resolvable option, first on ties.
    BestScore,
}

/// Resolution engine catalogs, scoring and policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Standard daily time blocks.
    pub time_blocks: Vec<TimeBlock>,
    /// Room inventory.
    pub rooms: Vec<Room>,
    /// Days considered for moves.
    pub days: Vec<Day>,
    /// Candidate scoring constants.
    pub scoring: ScoringConfig,
    /// Minimum score for an option to be auto-resolvable.
    pub auto_resolve_min_score: i32,
    /// Block/section duration mismatch tolerated (minutes).
    pub duration_tolerance_minutes: i64,
    /// Candidates returned per search.
    pub max_suggestions: usize,
    /// Auto-resolve selection policy.
    pub policy: AutoResolvePolicy,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            time_blocks: default_time_blocks(),
            rooms: default_rooms(),
            days: default_days(),
            scoring: ScoringConfig::default(),
            auto_resolve_min_score: 80,
            duration_tolerance_minutes: 15,
            max_suggestions: 5,
            policy: AutoResolvePolicy::FirstGenerated,
        }
    }
}

impl ResolutionConfig {
    /// Replaces the time block ladder.
    pub fn with_time_blocks(mut self, blocks: Vec<TimeBlock>) -> Self {
        self.time_blocks = blocks;
        self
    }

    /// Replaces the room inventory.
    pub fn with_rooms(mut self, rooms: Vec<Room>) -> Self {
        self.rooms = rooms;
        self
    }

    /// Replaces the teaching days.
    pub fn with_days(mut self, days: Vec<Day>) -> Self {
        self.days = days;
        self
    }

    /// Sets the auto-resolve policy.
    pub fn with_policy(mut self, policy: AutoResolvePolicy) -> Self {
        self.policy = policy;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(b) = self.time_blocks.iter().find(|b| b.start >= b.end) {
            return Err(ConfigError::Invalid(format!(
                "time block {}-{} ends before it starts",
                b.start.format("%H:%M"),
                b.end.format("%H:%M")
            )));
        }
        if let Some(r) = self.rooms.iter().find(|r| r.number.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "room with capacity {} has no number",
                r.capacity
            )));
        }
        if !(0..=100).contains(&self.auto_resolve_min_score) {
            return Err(ConfigError::Invalid(
                "resolution.auto_resolve_min_score must be within 0..=100".into(),
            ));
        }
        if self.duration_tolerance_minutes < 0 {
            return Err(ConfigError::Invalid(
                "resolution.duration_tolerance_minutes must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Heuristic scoring constants for alternative slots and rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Starting score for every candidate.
    pub base_score: i32,
    /// Preferred window start (inclusive).
    pub midday_start: NaiveTime,
    /// Preferred window end (inclusive).
    pub midday_end: NaiveTime,
    /// Bonus for starting inside the preferred window.
    pub midday_bonus: i32,
    /// Starts before this are penalized.
    pub early_cutoff: NaiveTime,
    /// Starts after this are penalized.
    pub late_cutoff: NaiveTime,
    /// Penalty for early or late starts.
    pub off_hours_penalty: i32,
    /// Days earning a bonus.
    pub preferred_days: Vec<Day>,
    /// Bonus for preferred days.
    pub preferred_day_bonus: i32,
    /// Days earning a penalty.
    pub edge_days: Vec<Day>,
    /// Penalty for edge days.
    pub edge_day_penalty: i32,
    /// Capacity/required ratio up to which a room is a tight fit.
    pub tight_fit_ratio: f64,
    /// Capacity/required ratio up to which a room is a good fit.
    pub good_fit_ratio: f64,
    /// Bonus for a tight fit.
    pub tight_fit_bonus: i32,
    /// Bonus for a good fit.
    pub good_fit_bonus: i32,
    /// Bonus for an oversized room.
    pub oversized_bonus: i32,
    /// Penalty for an undersized room.
    pub undersized_penalty: i32,
    /// Bonus for first-floor rooms.
    pub first_floor_bonus: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 70,
            midday_start: hm(10, 0),
            midday_end: hm(14, 0),
            midday_bonus: 20,
            early_cutoff: hm(9, 0),
            late_cutoff: hm(16, 0),
            off_hours_penalty: 20,
            preferred_days: vec![Day::Tuesday, Day::Wednesday],
            preferred_day_bonus: 10,
            edge_days: vec![Day::Sunday, Day::Thursday],
            edge_day_penalty: 5,
            tight_fit_ratio: 1.2,
            good_fit_ratio: 1.5,
            tight_fit_bonus: 30,
            good_fit_bonus: 20,
            oversized_bonus: 10,
            undersized_penalty: 50,
            first_floor_bonus: 5,
        }
    }
}

/// Capacity planning settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seats per planned section.
    pub section_capacity: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            section_capacity: 30,
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.section_capacity == 0 {
            return Err(ConfigError::Invalid(
                "generator.section_capacity must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = EngineConfig::default();
        assert!((c.checker.capacity_error_ratio - 0.20).abs() < 1e-10);
        assert_eq!(c.checker.auto_resolve_max_overage, 5);
        assert_eq!(c.resolution.auto_resolve_min_score, 80);
        assert_eq!(c.resolution.duration_tolerance_minutes, 15);
        assert_eq!(c.resolution.time_blocks.len(), 6);
        assert_eq!(c.resolution.scoring.base_score, 70);
        assert_eq!(c.resolution.policy, AutoResolvePolicy::FirstGenerated);
        assert_eq!(c.generator.section_capacity, 30);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let c = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(c, EngineConfig::default());
    }

    #[test]
    fn test_toml_catalog_override() {
        let c = EngineConfig::from_toml_str(
            r#"
            [resolution]
            days = ["tuesday"]

            [[resolution.time_blocks]]
            start = "11:00:00"
            end = "12:30:00"

            [[resolution.rooms]]
            number = "101"
            capacity = 25
            "#,
        )
        .unwrap();
        assert_eq!(c.resolution.days, vec![Day::Tuesday]);
        assert_eq!(c.resolution.time_blocks, vec![TimeBlock::hm((11, 0), (12, 30))]);
        assert_eq!(c.resolution.rooms, vec![Room::new("101", 25)]);
        // untouched sections keep defaults
        assert_eq!(c.resolution.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = EngineConfig::from_toml_str("[checker\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut c = EngineConfig::default();
        c.generator.section_capacity = 0;
        assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));

        let mut c = EngineConfig::default();
        c.resolution.time_blocks = vec![TimeBlock::hm((12, 0), (11, 0))];
        assert!(c.validate().is_err());

        let mut c = EngineConfig::default();
        c.checker.max_daily_hours = Some(0.0);
        assert!(c.validate().is_err());

        let mut c = EngineConfig::default();
        c.resolution.auto_resolve_min_score = 120;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load("/nonexistent/u-timetable.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
