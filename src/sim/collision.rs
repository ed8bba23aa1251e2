//! Collision detection and scoring
//!
//! Every entity uses the same square bounding box (± half-extent around its
//! position). All checks here are pure over the data they are handed.

use glam::Vec2;

use super::entity::{Enemy, Shot};
use super::score::ScoreEvent;
use super::snapshot::Snapshot;

/// Strict bounding box overlap: both axes closer than `half_extent`
#[inline]
pub fn overlaps(a: Vec2, b: Vec2, half_extent: f32) -> bool {
    (a.x - b.x).abs() < half_extent && (a.y - b.y).abs() < half_extent
}

/// Resolve player shots against living enemies.
///
/// A hit kills the enemy, parks the shot off-screen and pushes exactly one
/// score event. Spent shots and dead enemies are skipped, so repeating the
/// call on the same frame never counts a hit twice. Returns the hit count.
pub fn resolve_hits(
    shots: &mut [Shot],
    enemies: &mut [Enemy],
    half_extent: f32,
    points: u32,
    events: &mut Vec<ScoreEvent>,
) -> usize {
    let mut hits = 0;
    for shot in shots.iter_mut().filter(|s| !s.is_spent()) {
        let target = enemies
            .iter_mut()
            .find(|e| !e.is_dead && overlaps(shot.pos, e.pos, half_extent));
        if let Some(enemy) = target {
            enemy.is_dead = true;
            shot.invalidate();
            events.push(ScoreEvent { points });
            log::debug!("enemy {} destroyed", enemy.id);
            hits += 1;
        }
    }
    hits
}

/// The ship touches a living enemy or any enemy shot
pub fn is_game_over(snapshot: &Snapshot, half_extent: f32) -> bool {
    let ship = snapshot.ship.pos;
    snapshot
        .alive_enemies()
        .any(|e| overlaps(ship, e.pos, half_extent))
        || snapshot
            .enemy_shots()
            .any(|s| overlaps(ship, s.pos, half_extent))
}
