//! Game state and lifecycle
//!
//! Owns every field, the timer arena and the seeded RNG. Each field is only
//! ever mutated by its own update step, driven from `tick::advance`.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Scheduler;
use super::enemies::EnemyPopulation;
use super::entity::{Enemy, Ship, Shot, Star};
use super::score::{Score, ScoreEvent};
use super::ship::ShipField;
use super::shots::PlayerShots;
use super::snapshot::Snapshot;
use super::starfield::Starfield;
use crate::config::GameConfig;
use crate::input::{FireSampler, InputEvent};

/// Lifecycle phase. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    GameOver,
}

/// What a timer drives when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Starfield tick, motion step and snapshot sampling
    Frame,
    /// New enemy
    EnemySpawn,
    /// Fire input sampling window
    FireSample,
    /// One enemy's own gun
    EnemyFire(u32),
}

/// Complete game state (deterministic per seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) phase: GamePhase,
    pub(crate) scheduler: Scheduler<TimerKind>,
    pub(crate) starfield: Starfield,
    pub(crate) ship: ShipField,
    pub(crate) enemies: EnemyPopulation,
    pub(crate) player_shots: PlayerShots,
    pub(crate) score: Score,
    pub(crate) fire: FireSampler,
    /// Collision engine -> score fold
    pub(crate) score_events: Vec<ScoreEvent>,
    /// Input not yet applied, in delivery order
    pub(crate) inputs: VecDeque<InputEvent>,
    /// Sampled frames so far
    pub(crate) frame: u64,
    /// Most recent composed frame (the terminal one after game over)
    pub(crate) last_snapshot: Option<Snapshot>,
}

impl GameState {
    /// Start a new game. Fields and timers come up immediately.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let starfield = Starfield::new(&mut rng, &config);
        let ship = ShipField::new(&config);

        let mut scheduler = Scheduler::new();
        scheduler.spawn(config.frame_interval_ms, TimerKind::Frame);
        scheduler.spawn(config.enemy_spawn_interval_ms, TimerKind::EnemySpawn);
        scheduler.spawn(config.fire_sample_interval_ms, TimerKind::FireSample);

        log::info!(
            "new game: seed {seed}, {}x{} field, {} stars",
            config.width,
            config.height,
            config.star_count
        );

        Self {
            config,
            seed,
            rng,
            phase: GamePhase::Running,
            scheduler,
            starfield,
            ship,
            enemies: EnemyPopulation::new(),
            player_shots: PlayerShots::new(),
            score: Score::new(),
            fire: FireSampler::new(),
            score_events: Vec::new(),
            inputs: VecDeque::new(),
            frame: 0,
            last_snapshot: None,
        }
    }

    /// Queue an input event. Malformed events and input after game over are
    /// dropped.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        if !event.is_well_formed() {
            log::trace!("dropping malformed input {event:?}");
            return;
        }
        self.inputs.push_back(event);
    }

    /// Apply one input event to its field
    pub(crate) fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, .. } => self.ship.pointer_moved(x),
            InputEvent::Nudge { dx, .. } => self.ship.nudge(dx),
            InputEvent::Fire { timestamp } => self.fire.press(timestamp),
        }
    }

    /// Place an enemy at an exact position (scripted waves, scenarios)
    pub fn spawn_enemy_at(&mut self, pos: Vec2) -> Option<u32> {
        if self.phase == GamePhase::GameOver {
            return None;
        }
        Some(
            self.enemies
                .spawn_at(pos, &self.config, &mut self.scheduler),
        )
    }

    /// Combine the latest value of every field
    pub(crate) fn compose(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            time_ms: self.scheduler.now_ms(),
            stars: self.starfield.stars().to_vec(),
            ship: self.ship.ship(),
            enemies: self.enemies.enemies().to_vec(),
            player_shots: self.player_shots.shots().to_vec(),
            score: self.score.total(),
        }
    }

    /// Enter the terminal phase and stop every producer
    pub(crate) fn finish(&mut self, terminal: Snapshot) {
        let cancelled = self.scheduler.cancel_all();
        self.enemies.release_timers();
        self.inputs.clear();
        self.phase = GamePhase::GameOver;
        log::info!(
            "game over at frame {} ({} ms), score {}, {cancelled} timers stopped",
            terminal.frame,
            terminal.time_ms,
            terminal.score
        );
        self.last_snapshot = Some(terminal);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn score(&self) -> u64 {
        self.score.total()
    }

    /// Timers still scheduled (zero once the game is over)
    pub fn active_timers(&self) -> usize {
        self.scheduler.active_count()
    }

    pub fn stars(&self) -> &[Star] {
        self.starfield.stars()
    }

    pub fn ship(&self) -> Ship {
        self.ship.ship()
    }

    pub fn enemies(&self) -> &[Enemy] {
        self.enemies.enemies()
    }

    pub fn player_shots(&self) -> &[Shot] {
        self.player_shots.shots()
    }

    /// Latest composed frame; after game over, the terminal one
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }
}
