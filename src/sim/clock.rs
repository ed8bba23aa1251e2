//! Periodic timers on virtual time
//!
//! One timer primitive, instantiated at several periods. Every timer lives in
//! a single `Scheduler` arena and is addressed by a `TimerId` handle, so any
//! producer can be cancelled individually or all at once on teardown.

use std::collections::BTreeMap;

/// Handle to a timer in a `Scheduler`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u32);

#[derive(Debug, Clone)]
struct Timer<T> {
    interval_ms: u64,
    next_due_ms: u64,
    payload: T,
}

/// A single timer firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<T> {
    pub id: TimerId,
    /// Virtual time the tick was due at
    pub at_ms: u64,
    pub payload: T,
}

/// Arena of periodic timers driven by explicit time advancement
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    /// Keyed by id so ties on due time fire in creation order
    timers: BTreeMap<TimerId, Timer<T>>,
    next_id: u32,
}

impl<T: Copy> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            timers: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Start a periodic timer. The first tick is one interval from now.
    pub fn spawn(&mut self, interval_ms: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let interval_ms = interval_ms.max(1);
        self.timers.insert(
            id,
            Timer {
                interval_ms,
                next_due_ms: self.now_ms + interval_ms,
                payload,
            },
        );
        id
    }

    /// Stop a timer. Returns false if it was already gone.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Stop every timer, returning how many were running
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the earliest pending tick
    pub fn next_due_ms(&self) -> Option<u64> {
        self.timers.values().map(|t| t.next_due_ms).min()
    }

    /// Fire the earliest tick due at or before `until_ms`, moving the clock
    /// to its due time and rescheduling the timer.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<T>> {
        let (&id, _) = self
            .timers
            .iter()
            .filter(|(_, t)| t.next_due_ms <= until_ms)
            .min_by_key(|(id, t)| (t.next_due_ms, **id))?;

        let timer = self.timers.get_mut(&id)?;
        let at_ms = timer.next_due_ms;
        timer.next_due_ms += timer.interval_ms;
        self.now_ms = self.now_ms.max(at_ms);

        Some(Fired {
            id,
            at_ms,
            payload: timer.payload,
        })
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler<char>, until: u64) -> Vec<(u64, char)> {
        let mut fired = Vec::new();
        while let Some(f) = scheduler.pop_due(until) {
            fired.push((f.at_ms, f.payload));
        }
        scheduler.advance_to(until);
        fired
    }

    #[test]
    fn test_interleaves_periods_in_time_order() {
        let mut scheduler = Scheduler::new();
        scheduler.spawn(40, 'f');
        scheduler.spawn(100, 's');

        let fired = drain(&mut scheduler, 200);
        assert_eq!(
            fired,
            vec![
                (40, 'f'),
                (80, 'f'),
                (100, 's'),
                (120, 'f'),
                (160, 'f'),
                (200, 'f'),
                (200, 's'),
            ]
        );
        assert_eq!(scheduler.now_ms(), 200);
    }

    #[test]
    fn test_ties_fire_in_creation_order() {
        let mut scheduler = Scheduler::new();
        scheduler.spawn(50, 'b');
        scheduler.spawn(50, 'a');
        assert_eq!(drain(&mut scheduler, 50), vec![(50, 'b'), (50, 'a')]);
    }

    #[test]
    fn test_spawn_mid_advance_starts_from_fire_time() {
        let mut scheduler = Scheduler::new();
        scheduler.spawn(100, 'p');

        let first = scheduler.pop_due(250).unwrap();
        assert_eq!(first.at_ms, 100);
        scheduler.spawn(30, 'c');

        let rest: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(250))
            .map(|f| (f.at_ms, f.payload))
            .collect();
        assert_eq!(
            rest,
            vec![
                (130, 'c'),
                (160, 'c'),
                (190, 'c'),
                (200, 'p'),
                (220, 'c'),
                (250, 'c'),
            ]
        );
    }

    #[test]
    fn test_cancel_stops_timer() {
        let mut scheduler = Scheduler::new();
        let keep = scheduler.spawn(10, 'k');
        let stop = scheduler.spawn(10, 's');

        assert!(scheduler.cancel(stop));
        assert!(!scheduler.cancel(stop));
        assert!(scheduler.is_active(keep));
        assert!(!scheduler.is_active(stop));
        assert!(drain(&mut scheduler, 30).iter().all(|(_, p)| *p == 'k'));
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        for _ in 0..5 {
            scheduler.spawn(10, 'x');
        }
        assert_eq!(scheduler.cancel_all(), 5);
        assert_eq!(scheduler.active_count(), 0);
        assert_eq!(scheduler.next_due_ms(), None);
        assert!(drain(&mut scheduler, 1000).is_empty());
    }

    #[test]
    fn test_nothing_due_before_interval() {
        let mut scheduler = Scheduler::new();
        scheduler.spawn(40, 'f');
        assert!(scheduler.pop_due(39).is_none());
        assert_eq!(scheduler.next_due_ms(), Some(40));
    }
}
