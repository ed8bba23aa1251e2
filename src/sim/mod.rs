//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual time only, advanced explicitly by the caller
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod enemies;
pub mod entity;
pub mod score;
pub mod ship;
pub mod shots;
pub mod snapshot;
pub mod starfield;
pub mod state;
pub mod tick;

pub use clock::{Fired, Scheduler, TimerId};
pub use collision::{is_game_over, overlaps, resolve_hits};
pub use enemies::EnemyPopulation;
pub use entity::{Enemy, Ship, Shot, Star, new_enemy, new_star};
pub use score::{Score, ScoreEvent};
pub use ship::ShipField;
pub use shots::PlayerShots;
pub use snapshot::Snapshot;
pub use starfield::Starfield;
pub use state::{GamePhase, GameState, TimerKind};
pub use tick::{advance, advance_and_render};
