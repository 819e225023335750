//! Millisecond clocks for the effect engine.

use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Must not go backwards.
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by `instant`, so it works in browsers too.
#[derive(Clone, Debug)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock. Clones share the same time, so a test (or the replay
/// driver) can keep one handle and give another to the engine.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let a = ManualClock::new(10.0);
        let b = a.clone();
        a.advance(5.5);
        assert_eq!(b.now_ms(), 15.5);
        b.set(100.0);
        assert_eq!(a.now_ms(), 100.0);
    }

    #[test]
    fn instant_clock_is_monotonic() {
        let c = InstantClock::new();
        let t0 = c.now_ms();
        let t1 = c.now_ms();
        assert!(t1 >= t0);
    }
}
