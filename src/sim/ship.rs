//! Player ship position

use glam::Vec2;

use super::entity::Ship;
use crate::config::GameConfig;

/// Latest ship position. Starts centered so composition never waits for input.
#[derive(Debug, Clone)]
pub struct ShipField {
    ship: Ship,
    width: f32,
}

impl ShipField {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            ship: Ship {
                pos: config.ship_origin(),
            },
            width: config.width,
        }
    }

    /// Pointer moved: follow its x, keep the fixed row
    pub fn pointer_moved(&mut self, x: f32) {
        self.ship.pos.x = x;
    }

    /// Keyboard steering, clamped to the visible width
    pub fn nudge(&mut self, dx: f32) {
        self.ship.pos.x = (self.ship.pos.x + dx).clamp(0.0, self.width);
    }

    pub fn ship(&self) -> Ship {
        self.ship
    }

    pub fn pos(&self) -> Vec2 {
        self.ship.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_centered_near_bottom() {
        let config = GameConfig::default();
        let field = ShipField::new(&config);
        assert_eq!(field.pos(), Vec2::new(400.0, 570.0));
    }

    #[test]
    fn test_pointer_sets_x_only() {
        let mut field = ShipField::new(&GameConfig::default());
        field.pointer_moved(123.0);
        assert_eq!(field.pos(), Vec2::new(123.0, 570.0));
    }

    #[test]
    fn test_nudge_clamps() {
        let mut field = ShipField::new(&GameConfig::default());
        field.nudge(-1000.0);
        assert_eq!(field.pos().x, 0.0);
        field.nudge(20.0);
        assert_eq!(field.pos().x, 20.0);
        field.nudge(5000.0);
        assert_eq!(field.pos().x, 800.0);
    }
}
