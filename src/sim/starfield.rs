//! Scrolling starfield

use rand::Rng;

use super::entity::{Star, new_star};
use crate::config::GameConfig;

/// Fixed-size set of stars falling at their own speed
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    height: f32,
}

impl Starfield {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Self {
        Self {
            stars: (0..config.star_count).map(|_| new_star(rng, config)).collect(),
            height: config.height,
        }
    }

    /// Build from explicit stars
    pub fn from_stars(stars: Vec<Star>, height: f32) -> Self {
        Self { stars, height }
    }

    /// One tick: every star falls by its size and wraps at the bottom edge
    pub fn tick(&mut self) {
        for star in &mut self.stars {
            star.pos.y = (star.pos.y + star.size).rem_euclid(self.height);
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_star_count_is_fixed() {
        let config = GameConfig {
            star_count: 17,
            ..GameConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = Starfield::new(&mut rng, &config);
        for _ in 0..100 {
            field.tick();
        }
        assert_eq!(field.stars().len(), 17);
    }

    #[test]
    fn test_wraps_to_top() {
        let mut field = Starfield::from_stars(
            vec![Star {
                pos: Vec2::new(5.0, 598.0),
                size: 3.0,
            }],
            600.0,
        );
        field.tick();
        assert_eq!(field.stars()[0].pos.y, 1.0);
        assert_eq!(field.stars()[0].pos.x, 5.0);
    }

    proptest! {
        #[test]
        fn prop_wrap_invariant(y0 in 0u32..600, size in 1u32..4, k in 0u32..2000) {
            let mut field = Starfield::from_stars(
                vec![Star { pos: Vec2::new(0.0, y0 as f32), size: size as f32 }],
                600.0,
            );
            for _ in 0..k {
                field.tick();
            }
            let expected = ((y0 + k * size) % 600) as f32;
            prop_assert_eq!(field.stars()[0].pos.y, expected);
        }
    }
}
