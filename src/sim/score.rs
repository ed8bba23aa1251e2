//! Running score

use serde::{Deserialize, Serialize};

/// One resolved hit, emitted by the collision engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub points: u32,
}

/// Fold of score events, seeded at zero. Never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    total: u64,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain pending events into the total
    pub fn apply(&mut self, events: &mut Vec<ScoreEvent>) {
        for event in events.drain(..) {
            self.total += u64::from(event.points);
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}
