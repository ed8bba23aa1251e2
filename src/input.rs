//! Input events and fire-rate sampling
//!
//! Timestamps are in the game's virtual milliseconds.

use serde::{Deserialize, Serialize};

/// Raw input delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer position (continuous, most recent wins)
    PointerMove { x: f32, y: f32, timestamp: u64 },
    /// Click or fire key
    Fire { timestamp: u64 },
    /// Keyboard steering by a signed horizontal delta
    Nudge { dx: f32, timestamp: u64 },
}

impl InputEvent {
    pub fn timestamp(&self) -> u64 {
        match *self {
            InputEvent::PointerMove { timestamp, .. }
            | InputEvent::Fire { timestamp }
            | InputEvent::Nudge { timestamp, .. } => timestamp,
        }
    }

    /// Events with non-finite coordinates carry no usable position
    pub fn is_well_formed(&self) -> bool {
        match *self {
            InputEvent::PointerMove { x, y, .. } => x.is_finite() && y.is_finite(),
            InputEvent::Fire { .. } => true,
            InputEvent::Nudge { dx, .. } => dx.is_finite(),
        }
    }
}

/// Collapses fire input to at most one shot per sampling window.
///
/// Between samples only the latest fire event is kept. A sample whose event
/// carries the same timestamp as the last honored one is a duplicate
/// delivery of the same press and is dropped.
#[derive(Debug, Clone, Default)]
pub struct FireSampler {
    pending: Option<u64>,
    last_honored: Option<u64>,
}

impl FireSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fire press
    pub fn press(&mut self, timestamp: u64) {
        self.pending = Some(timestamp);
    }

    /// Sampling tick. Returns the honored event's timestamp, if any.
    pub fn sample(&mut self) -> Option<u64> {
        let timestamp = self.pending.take()?;
        if self.last_honored == Some(timestamp) {
            log::trace!("duplicate fire event at {timestamp} dropped");
            return None;
        }
        self.last_honored = Some(timestamp);
        Some(timestamp)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presses_in_one_window_collapse() {
        let mut sampler = FireSampler::new();
        sampler.press(10);
        sampler.press(20);
        sampler.press(150);
        assert_eq!(sampler.sample(), Some(150));
        assert_eq!(sampler.sample(), None);
    }

    #[test]
    fn test_idle_window_yields_nothing() {
        let mut sampler = FireSampler::new();
        assert_eq!(sampler.sample(), None);
        assert!(!sampler.has_pending());
    }

    #[test]
    fn test_duplicate_timestamp_dropped() {
        let mut sampler = FireSampler::new();
        sampler.press(10);
        assert_eq!(sampler.sample(), Some(10));
        sampler.press(10);
        assert_eq!(sampler.sample(), None);
        sampler.press(11);
        assert_eq!(sampler.sample(), Some(11));
    }

    #[test]
    fn test_malformed_events() {
        assert!(!InputEvent::PointerMove { x: f32::NAN, y: 1.0, timestamp: 0 }.is_well_formed());
        assert!(!InputEvent::Nudge { dx: f32::INFINITY, timestamp: 0 }.is_well_formed());
        assert!(InputEvent::PointerMove { x: 1.0, y: 1.0, timestamp: 0 }.is_well_formed());
        assert!(InputEvent::Fire { timestamp: 5 }.is_well_formed());
        assert_eq!(InputEvent::Fire { timestamp: 5 }.timestamp(), 5);
    }
}
