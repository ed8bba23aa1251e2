//! Entity records and the factories that create them
//!
//! Factories take the RNG by reference so a seeded generator owned by the
//! game state keeps runs reproducible.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::clock::TimerId;
use crate::config::GameConfig;
use crate::consts::OFFSCREEN;

/// A background star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Square side length, doubles as fall speed
    pub size: f32,
}

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
}

/// A shot, fired either by the player or by an enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub pos: Vec2,
}

impl Shot {
    pub fn at(pos: Vec2) -> Self {
        Self { pos }
    }

    /// Park the shot outside the visible area. It never collides again and
    /// the next visibility prune removes it.
    pub fn invalidate(&mut self) {
        self.pos = Vec2::splat(OFFSCREEN);
    }

    pub fn is_spent(&self) -> bool {
        self.pos == Vec2::splat(OFFSCREEN)
    }
}

/// A descending raider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub is_dead: bool,
    /// Shots fired by this enemy, oldest first
    pub shots: Vec<Shot>,
    /// Handle of this enemy's fire timer (not part of rendered state)
    #[serde(skip)]
    pub fire_timer: Option<TimerId>,
}

impl Enemy {
    /// Nothing left to draw: dead and every shot gone
    pub fn is_spent(&self) -> bool {
        self.is_dead && self.shots.is_empty()
    }
}

/// Random star anywhere in the visible area
pub fn new_star<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Star {
    Star {
        pos: Vec2::new(
            rng.random_range(0.0..config.width),
            rng.random_range(0.0..config.height),
        ),
        size: rng.random_range(config.star_min_size..config.star_max_size),
    }
}

/// Fresh enemy at a random column just above the top edge
pub fn new_enemy<R: Rng + ?Sized>(rng: &mut R, id: u32, config: &GameConfig) -> Enemy {
    Enemy {
        id,
        pos: Vec2::new(rng.random_range(0.0..=config.width), config.enemy_spawn_y),
        is_dead: false,
        shots: Vec::new(),
        fire_timer: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_stars_within_bounds() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let star = new_star(&mut rng, &config);
            assert!((0.0..config.width).contains(&star.pos.x));
            assert!((0.0..config.height).contains(&star.pos.y));
            assert!((config.star_min_size..config.star_max_size).contains(&star.size));
        }
    }

    #[test]
    fn test_enemy_spawns_above_top_edge() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let enemy = new_enemy(&mut rng, 3, &config);
        assert_eq!(enemy.id, 3);
        assert_eq!(enemy.pos.y, config.enemy_spawn_y);
        assert!(enemy.pos.y < 0.0);
        assert!(config.is_visible(enemy.pos));
        assert!(!enemy.is_dead);
        assert!(enemy.shots.is_empty());
        assert!(enemy.fire_timer.is_none());
    }

    #[test]
    fn test_invalidated_shot_is_spent() {
        let mut shot = Shot::at(Vec2::new(100.0, 300.0));
        assert!(!shot.is_spent());
        shot.invalidate();
        assert!(shot.is_spent());
        assert!(!GameConfig::default().is_visible(shot.pos));
    }

    #[test]
    fn test_enemy_spent_only_when_dead_and_shotless() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = new_enemy(&mut rng, 1, &GameConfig::default());
        assert!(!enemy.is_spent());
        enemy.is_dead = true;
        enemy.shots.push(Shot::at(enemy.pos));
        assert!(!enemy.is_spent());
        enemy.shots.clear();
        assert!(enemy.is_spent());
    }
}
