//! Enemy population
//!
//! Enemies are kept in creation order. Each one owns its shots and the handle
//! of its own fire timer; removing an enemy always cancels that timer.

use glam::Vec2;
use rand::Rng;

use super::clock::Scheduler;
use super::entity::{Enemy, Shot, new_enemy};
use super::state::TimerKind;
use crate::config::GameConfig;

#[derive(Debug, Clone, Default)]
pub struct EnemyPopulation {
    enemies: Vec<Enemy>,
    next_id: u32,
}

impl EnemyPopulation {
    pub fn new() -> Self {
        Self {
            enemies: Vec::new(),
            next_id: 1,
        }
    }

    /// Spawn tick: one new enemy at a random column above the top edge
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &GameConfig,
        scheduler: &mut Scheduler<TimerKind>,
    ) -> u32 {
        let id = self.allocate_id();
        let enemy = new_enemy(rng, id, config);
        self.insert(enemy, config, scheduler)
    }

    /// Spawn an enemy at an exact position
    pub fn spawn_at(
        &mut self,
        pos: Vec2,
        config: &GameConfig,
        scheduler: &mut Scheduler<TimerKind>,
    ) -> u32 {
        let id = self.allocate_id();
        let enemy = Enemy {
            id,
            pos,
            is_dead: false,
            shots: Vec::new(),
            fire_timer: None,
        };
        self.insert(enemy, config, scheduler)
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    fn insert(
        &mut self,
        mut enemy: Enemy,
        config: &GameConfig,
        scheduler: &mut Scheduler<TimerKind>,
    ) -> u32 {
        let id = enemy.id;
        enemy.fire_timer = Some(scheduler.spawn(
            config.enemy_fire_interval_ms,
            TimerKind::EnemyFire(id),
        ));
        log::debug!("enemy {id} spawned at ({:.0}, {:.0})", enemy.pos.x, enemy.pos.y);
        self.enemies.push(enemy);
        id
    }

    /// Fire tick for one enemy. Only living enemies add shots; a dead
    /// enemy's timer keeps running while its remaining shots drain.
    pub fn fire(&mut self, id: u32, config: &GameConfig) -> bool {
        let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        enemy.shots.retain(|s| config.is_visible(s.pos));
        if enemy.is_dead {
            return false;
        }
        enemy.shots.push(Shot::at(enemy.pos));
        true
    }

    /// Frame tick: enemies descend with horizontal jitter, their shots fall
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &GameConfig) {
        for enemy in &mut self.enemies {
            enemy.pos.y += config.enemy_speed;
            if config.enemy_drift > 0.0 {
                enemy.pos.x += rng.random_range(-config.enemy_drift..=config.enemy_drift);
            }
            for shot in &mut enemy.shots {
                shot.pos.y += config.enemy_shot_speed;
            }
        }
    }

    /// Drop shots and enemies outside the visibility margin, and dead
    /// enemies with nothing left to draw. Returns how many enemies left.
    pub fn prune(&mut self, config: &GameConfig, scheduler: &mut Scheduler<TimerKind>) -> usize {
        let before = self.enemies.len();
        self.enemies.retain_mut(|enemy| {
            enemy.shots.retain(|s| config.is_visible(s.pos));
            let keep = config.is_visible(enemy.pos) && !enemy.is_spent();
            if !keep {
                if let Some(timer) = enemy.fire_timer.take() {
                    scheduler.cancel(timer);
                }
                log::debug!("enemy {} pruned", enemy.id);
            }
            keep
        });
        before - self.enemies.len()
    }

    /// Forget every timer handle after the scheduler has been torn down
    pub fn release_timers(&mut self) {
        for enemy in &mut self.enemies {
            enemy.fire_timer = None;
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}
