//! Void Raiders - A top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (timers, fields, collisions, composition)
//! - `input`: Input events and fire-rate sampling
//! - `render`: Render sink abstraction consumed once per frame
//! - `config`: Data-driven game configuration

pub mod config;
pub mod input;
pub mod render;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use input::InputEvent;
pub use render::RenderSink;
pub use sim::{GamePhase, GameState, Snapshot};

/// Default game configuration constants
pub mod consts {
    /// Visible area (logical pixels)
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;

    /// Frame cadence: starfield tick, motion step and snapshot sampling (ms)
    pub const FRAME_INTERVAL_MS: u64 = 40;

    /// Starfield
    pub const STAR_COUNT: usize = 250;
    pub const STAR_MIN_SIZE: f32 = 1.0;
    pub const STAR_MAX_SIZE: f32 = 4.0;

    /// Ship sits this far above the bottom edge
    pub const SHIP_BOTTOM_OFFSET: f32 = 30.0;
    /// Horizontal step per keyboard nudge
    pub const NUDGE_STEP: f32 = 20.0;

    /// Enemies
    pub const ENEMY_SPAWN_INTERVAL_MS: u64 = 1500;
    pub const ENEMY_FIRE_INTERVAL_MS: u64 = 750;
    /// Spawn just above the top edge
    pub const ENEMY_SPAWN_Y: f32 = -30.0;
    pub const ENEMY_SPEED: f32 = 5.0;
    /// Max horizontal jitter per frame
    pub const ENEMY_DRIFT: f32 = 15.0;

    /// Shots
    pub const ENEMY_SHOT_SPEED: f32 = 15.0;
    pub const PLAYER_SHOT_SPEED: f32 = 15.0;
    /// Rapid fire collapses to one shot per sampling window
    pub const FIRE_SAMPLE_INTERVAL_MS: u64 = 200;

    /// Bounding box half-extent for every collision test
    pub const COLLISION_HALF_EXTENT: f32 = 20.0;
    pub const SCORE_INCREMENT: u32 = 10;
    /// Tolerance beyond the visible edges before pruning
    pub const VISIBILITY_MARGIN: f32 = 40.0;

    /// Coordinate a spent shot is parked at until pruning removes it
    pub const OFFSCREEN: f32 = -100.0;
}
