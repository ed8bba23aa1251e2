//! Render sinks
//!
//! The simulation hands each sampled frame to a `RenderSink` by shared
//! reference; drawing is entirely the sink's business.

use crate::sim::Snapshot;

/// Consumer of sampled frames
pub trait RenderSink {
    fn render(&mut self, snapshot: &Snapshot);
}

impl<F: FnMut(&Snapshot)> RenderSink for F {
    fn render(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// Headless sink: one log line per frame, an info line every `every` frames
#[derive(Debug, Clone)]
pub struct LogSink {
    every: u64,
    frames: u64,
}

impl LogSink {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for LogSink {
    fn render(&mut self, snapshot: &Snapshot) {
        self.frames += 1;
        let line = format!(
            "frame {} @ {} ms: ship x={:.0}, {} enemies ({} alive), {} enemy shots, {} player shots, score {}",
            snapshot.frame,
            snapshot.time_ms,
            snapshot.ship.pos.x,
            snapshot.enemies.len(),
            snapshot.alive_enemies().count(),
            snapshot.enemy_shots().count(),
            snapshot.player_shots.len(),
            snapshot.score
        );
        if self.frames % self.every == 0 {
            log::info!("{line}");
        } else {
            log::debug!("{line}");
        }
    }
}

/// Keeps every frame it is given (replays, tests)
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    pub frames: Vec<Snapshot>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.frames.last()
    }
}

impl RenderSink for FrameRecorder {
    fn render(&mut self, snapshot: &Snapshot) {
        self.frames.push(snapshot.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{GameState, advance_and_render};

    #[test]
    fn test_recorder_keeps_frames_in_order() {
        let mut state = GameState::new(GameConfig::default(), 9);
        let mut recorder = FrameRecorder::new();
        advance_and_render(&mut state, 200, &mut recorder);
        let frames: Vec<_> = recorder.frames.iter().map(|s| s.frame).collect();
        assert_eq!(frames, vec![1, 2, 3, 4, 5]);
        assert_eq!(recorder.last().map(|s| s.time_ms), Some(200));
    }

    #[test]
    fn test_log_sink_counts_frames() {
        let mut state = GameState::new(GameConfig::default(), 9);
        let mut sink = LogSink::new(0);
        advance_and_render(&mut state, 400, &mut sink);
        assert_eq!(sink.frames(), 10);
    }

    #[test]
    fn test_sink_as_trait_object() {
        let mut state = GameState::new(GameConfig::default(), 9);
        let mut recorder = FrameRecorder::new();
        let sink: &mut dyn RenderSink = &mut recorder;
        advance_and_render(&mut state, 80, sink);
        assert_eq!(recorder.frames.len(), 2);
    }
}
