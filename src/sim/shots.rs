//! Player shot queue

use glam::Vec2;

use super::entity::Shot;
use crate::config::GameConfig;

/// Player shots in firing order
#[derive(Debug, Clone, Default)]
pub struct PlayerShots {
    shots: Vec<Shot>,
}

impl PlayerShots {
    pub fn new() -> Self {
        Self::default()
    }

    /// A honored fire event: new shot from the ship's position
    pub fn fire(&mut self, origin: Vec2) {
        self.shots.push(Shot::at(origin));
    }

    /// Frame tick: every shot climbs
    pub fn advance(&mut self, config: &GameConfig) {
        for shot in &mut self.shots {
            shot.pos.y -= config.player_shot_speed;
        }
    }

    /// Drop shots past the visibility margin, including spent ones
    pub fn prune(&mut self, config: &GameConfig) -> usize {
        let before = self.shots.len();
        self.shots.retain(|s| config.is_visible(s.pos));
        before - self.shots.len()
    }

    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn shots_mut(&mut self) -> &mut [Shot] {
        &mut self.shots
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shots_climb_and_leave() {
        let config = GameConfig::default();
        let mut shots = PlayerShots::new();
        shots.fire(Vec2::new(10.0, 20.0));
        shots.advance(&config);
        assert_eq!(shots.shots()[0].pos, Vec2::new(10.0, 5.0));

        // -40 is outside the margin
        for _ in 0..3 {
            shots.advance(&config);
        }
        assert_eq!(shots.shots()[0].pos.y, -40.0);
        assert_eq!(shots.prune(&config), 1);
        assert!(shots.is_empty());
    }

    #[test]
    fn test_spent_shot_is_pruned() {
        let config = GameConfig::default();
        let mut shots = PlayerShots::new();
        shots.fire(Vec2::new(100.0, 300.0));
        shots.fire(Vec2::new(200.0, 300.0));
        shots.shots_mut()[0].invalidate();

        assert_eq!(shots.prune(&config), 1);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots.shots()[0].pos.x, 200.0);
    }
}
