//! Per-frame composite of every field

use serde::{Deserialize, Serialize};

use super::entity::{Enemy, Ship, Shot, Star};

/// Everything a renderer needs for one frame. Built once per sampled frame
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Sampled frame counter, starting at 1
    pub frame: u64,
    /// Virtual time the frame was sampled at
    pub time_ms: u64,
    pub stars: Vec<Star>,
    pub ship: Ship,
    pub enemies: Vec<Enemy>,
    pub player_shots: Vec<Shot>,
    pub score: u64,
}

impl Snapshot {
    /// Enemies still in play (not yet hit)
    pub fn alive_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| !e.is_dead)
    }

    /// Every enemy shot on screen, dead shooters included
    pub fn enemy_shots(&self) -> impl Iterator<Item = &Shot> {
        self.enemies.iter().flat_map(|e| e.shots.iter())
    }
}
