//! Game configuration
//!
//! Fixed for the lifetime of a game. Loaded from JSON on native builds,
//! sized to the canvas on the web.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Every tunable the simulation recognizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Visible area ===
    pub width: f32,
    pub height: f32,

    // === Clocks (ms) ===
    pub frame_interval_ms: u64,
    pub enemy_spawn_interval_ms: u64,
    pub enemy_fire_interval_ms: u64,
    pub fire_sample_interval_ms: u64,

    // === Starfield ===
    pub star_count: usize,
    pub star_min_size: f32,
    pub star_max_size: f32,

    // === Ship ===
    pub ship_bottom_offset: f32,
    pub nudge_step: f32,

    // === Enemies ===
    pub enemy_spawn_y: f32,
    pub enemy_speed: f32,
    pub enemy_drift: f32,

    // === Shots ===
    pub enemy_shot_speed: f32,
    pub player_shot_speed: f32,

    // === Rules ===
    pub collision_half_extent: f32,
    pub score_increment: u32,
    pub visibility_margin: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,

            frame_interval_ms: FRAME_INTERVAL_MS,
            enemy_spawn_interval_ms: ENEMY_SPAWN_INTERVAL_MS,
            enemy_fire_interval_ms: ENEMY_FIRE_INTERVAL_MS,
            fire_sample_interval_ms: FIRE_SAMPLE_INTERVAL_MS,

            star_count: STAR_COUNT,
            star_min_size: STAR_MIN_SIZE,
            star_max_size: STAR_MAX_SIZE,

            ship_bottom_offset: SHIP_BOTTOM_OFFSET,
            nudge_step: NUDGE_STEP,

            enemy_spawn_y: ENEMY_SPAWN_Y,
            enemy_speed: ENEMY_SPEED,
            enemy_drift: ENEMY_DRIFT,

            enemy_shot_speed: ENEMY_SHOT_SPEED,
            player_shot_speed: PLAYER_SHOT_SPEED,

            collision_half_extent: COLLISION_HALF_EXTENT,
            score_increment: SCORE_INCREMENT,
            visibility_margin: VISIBILITY_MARGIN,
        }
    }
}

impl GameConfig {
    /// Defaults resized to a given visible area (canvas/window size)
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if !(self.width.is_finite() && self.width > 0.0) {
            return invalid("width", "must be positive");
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return invalid("height", "must be positive");
        }
        for (field, interval) in [
            ("frame_interval_ms", self.frame_interval_ms),
            ("enemy_spawn_interval_ms", self.enemy_spawn_interval_ms),
            ("enemy_fire_interval_ms", self.enemy_fire_interval_ms),
            ("fire_sample_interval_ms", self.fire_sample_interval_ms),
        ] {
            if interval == 0 {
                return invalid(field, "must be non-zero");
            }
        }
        if !(self.star_min_size > 0.0 && self.star_min_size < self.star_max_size) {
            return invalid("star_min_size", "must be positive and below star_max_size");
        }
        if !(self.enemy_drift >= 0.0) {
            return invalid("enemy_drift", "must not be negative");
        }
        if !(self.collision_half_extent >= 0.0) {
            return invalid("collision_half_extent", "must not be negative");
        }
        if !(self.visibility_margin >= 0.0) {
            return invalid("visibility_margin", "must not be negative");
        }
        if !(self.enemy_spawn_y > -self.visibility_margin) {
            return invalid("enemy_spawn_y", "must lie inside the visibility margin");
        }
        Ok(())
    }

    /// Ship start position: horizontal center, fixed offset above the bottom
    pub fn ship_origin(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.ship_y())
    }

    /// Fixed ship row
    pub fn ship_y(&self) -> f32 {
        self.height - self.ship_bottom_offset
    }

    /// Whether a point lies within the visible area enlarged by the margin
    pub fn is_visible(&self, pos: Vec2) -> bool {
        let m = self.visibility_margin;
        pos.x > -m && pos.x < self.width + m && pos.y > -m && pos.y < self.height + m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "star_count": 10, "score_increment": 25 }"#).unwrap();
        assert_eq!(config.star_count, 10);
        assert_eq!(config.score_increment, 25);
        assert_eq!(config.frame_interval_ms, FRAME_INTERVAL_MS);
        assert_eq!(config.width, WIDTH);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = GameConfig::from_json(r#"{ "enemy_fire_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "enemy_fire_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_inverted_star_sizes() {
        let config = GameConfig {
            star_min_size: 5.0,
            star_max_size: 2.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_spawn_row_outside_margin() {
        let config = GameConfig {
            visibility_margin: 20.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "enemy_spawn_y",
                ..
            })
        ));

        // Exactly on the margin is already outside
        let config = GameConfig {
            visibility_margin: 30.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
        let config = GameConfig {
            visibility_margin: 31.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ width: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            GameConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_visibility_margin_is_exclusive() {
        let config = GameConfig::default();
        assert!(config.is_visible(Vec2::new(-39.0, -39.0)));
        assert!(!config.is_visible(Vec2::new(-40.0, 10.0)));
        assert!(!config.is_visible(Vec2::new(10.0, config.height + 40.0)));
        assert!(!config.is_visible(Vec2::new(OFFSCREEN, OFFSCREEN)));
    }

    #[test]
    fn test_ship_origin() {
        let config = GameConfig::with_size(400.0, 300.0);
        assert_eq!(config.ship_origin(), Vec2::new(200.0, 270.0));
    }
}
