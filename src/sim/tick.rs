//! Frame-driven update loop
//!
//! Advances virtual time, interleaving queued input with timer ticks in
//! timestamp order. Every frame tick prunes, moves, resolves collisions,
//! folds score, composes one snapshot and checks for game over.

use super::clock::Fired;
use super::collision::{is_game_over, resolve_hits};
use super::snapshot::Snapshot;
use super::state::{GamePhase, GameState, TimerKind};
use crate::render::RenderSink;

/// Advance the game by `dt_ms` of virtual time, returning every snapshot
/// sampled along the way. Returns nothing once the game is over.
pub fn advance(state: &mut GameState, dt_ms: u64) -> Vec<Snapshot> {
    let mut frames = Vec::new();
    if state.phase == GamePhase::GameOver {
        return frames;
    }

    let until = state.scheduler.now_ms() + dt_ms;
    loop {
        // Input stamped at or before the next tick lands first
        let bound = state
            .scheduler
            .next_due_ms()
            .filter(|&due| due <= until)
            .unwrap_or(until);
        while let Some(event) = state.inputs.front().copied() {
            if event.timestamp() > bound {
                break;
            }
            state.inputs.pop_front();
            state.apply_input(event);
        }

        let Some(fired) = state.scheduler.pop_due(until) else {
            break;
        };
        if let Some(snapshot) = on_timer(state, fired) {
            frames.push(snapshot);
        }
        if state.phase == GamePhase::GameOver {
            return frames;
        }
    }

    state.scheduler.advance_to(until);
    frames
}

/// Advance and hand each sampled frame to a render sink
pub fn advance_and_render<S: RenderSink + ?Sized>(
    state: &mut GameState,
    dt_ms: u64,
    sink: &mut S,
) -> GamePhase {
    for snapshot in advance(state, dt_ms) {
        sink.render(&snapshot);
    }
    state.phase
}

fn on_timer(state: &mut GameState, fired: Fired<TimerKind>) -> Option<Snapshot> {
    match fired.payload {
        TimerKind::Frame => frame_tick(state),
        TimerKind::EnemySpawn => {
            state
                .enemies
                .spawn(&mut state.rng, &state.config, &mut state.scheduler);
            state.enemies.prune(&state.config, &mut state.scheduler);
            None
        }
        TimerKind::FireSample => {
            if state.fire.sample().is_some() {
                state.player_shots.fire(state.ship.pos());
            }
            None
        }
        TimerKind::EnemyFire(id) => {
            state.enemies.fire(id, &state.config);
            None
        }
    }
}

/// One sampled frame
fn frame_tick(state: &mut GameState) -> Option<Snapshot> {
    let config = &state.config;

    // Last frame's leftovers (escaped entities, spent shots, drained enemies)
    state.player_shots.prune(config);
    state.enemies.prune(config, &mut state.scheduler);

    state.starfield.tick();
    state.player_shots.advance(config);
    state.enemies.advance(&mut state.rng, config);

    resolve_hits(
        state.player_shots.shots_mut(),
        state.enemies.enemies_mut(),
        config.collision_half_extent,
        config.score_increment,
        &mut state.score_events,
    );
    state.score.apply(&mut state.score_events);

    state.frame += 1;
    let snapshot = state.compose();

    if is_game_over(&snapshot, state.config.collision_half_extent) {
        state.finish(snapshot);
        return None;
    }

    state.last_snapshot = Some(snapshot.clone());
    Some(snapshot)
}
