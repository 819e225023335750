//! Delayed spawns evaluated against the engine clock.
//!
//! Instead of timers or deferred callbacks, a batch is armed with a start time
//! and a list of `(delay, what)` entries; each `update` drains whatever has
//! come due. Single-threaded and deterministic under a fake clock.

use smallvec::SmallVec;

#[derive(Clone, Debug)]
pub struct SpawnSchedule<T> {
    start_ms: f64,
    // sorted by delay, latest first, so due entries pop off the end
    pending: Vec<(f64, T)>,
}

impl<T> Default for SpawnSchedule<T> {
    fn default() -> Self {
        Self {
            start_ms: 0.0,
            pending: Vec::new(),
        }
    }
}

impl<T> SpawnSchedule<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending entries with a new batch starting at `start_ms`.
    pub fn arm(&mut self, start_ms: f64, entries: impl IntoIterator<Item = (f64, T)>) {
        self.start_ms = start_ms;
        self.pending = entries.into_iter().collect();
        self.pending
            .sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    }

    /// Remove and return every entry whose delay has elapsed, earliest first.
    pub fn drain_due(&mut self, now_ms: f64) -> SmallVec<[T; 4]> {
        let elapsed = now_ms - self.start_ms;
        let mut due = SmallVec::new();
        while let Some((delay, _)) = self.pending.last() {
            if *delay > elapsed {
                break;
            }
            if let Some((_, item)) = self.pending.pop() {
                due.push(item);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
