//! Tick timing.
//!
//! [`TickClock`] turns the wall-clock interval between two ticks into a
//! simulation step: elapsed seconds times the baseline rate. A tick taken
//! exactly at the baseline rate therefore advances one time unit. The very
//! first tick has no previous timestamp and uses the nominal interval.
//!
//! Where "now" comes from is a [`TimeSource`], so tests can drive the clock
//! with exact, repeatable intervals.

use std::time::Instant;

/// Monotonic time in seconds.
pub trait TimeSource {
    fn now(&mut self) -> f64;
}

/// Real elapsed time since construction.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Reads `0, step, 2*step, ...`: each read advances by a fixed interval.
#[derive(Debug, Clone)]
pub struct FixedClock {
    t: f64,
    step: f64,
}

impl FixedClock {
    pub fn new(step: f64) -> Self {
        Self { t: 0.0, step }
    }
}

impl TimeSource for FixedClock {
    fn now(&mut self) -> f64 {
        let t = self.t;
        self.t += self.step;
        t
    }
}

/// Replays a list of intervals. The first read returns 0; each later read
/// adds the next interval, repeating the last one once the list runs out.
/// An empty list behaves like a stopped clock.
#[derive(Debug, Clone)]
pub struct ScriptedClock {
    t: f64,
    intervals: Vec<f64>,
    cursor: usize,
}

impl ScriptedClock {
    pub fn new(intervals: Vec<f64>) -> Self {
        Self { t: 0.0, intervals, cursor: 0 }
    }
}

impl TimeSource for ScriptedClock {
    fn now(&mut self) -> f64 {
        let t = self.t;
        if let Some(&dt) = self.intervals.get(self.cursor).or(self.intervals.last()) {
            self.t += dt;
        }
        self.cursor += 1;
        t
    }
}

/// Converts wall-clock intervals into scaled simulation steps.
pub struct TickClock {
    source: Box<dyn TimeSource + Send>,
    baseline_rate: f64,
    last: Option<f64>,
}

impl TickClock {
    pub fn new(source: Box<dyn TimeSource + Send>, baseline_rate: f64) -> Self {
        Self {
            source,
            baseline_rate,
            last: None,
        }
    }

    /// Step for this tick. No smoothing: one long pause yields one long step.
    pub fn next_dt(&mut self) -> f64 {
        let now = self.source.now();
        let elapsed = match self.last.replace(now) {
            None => 1.0 / self.baseline_rate,
            Some(prev) => now - prev,
        };
        elapsed * self.baseline_rate
    }

    /// Forget the previous timestamp; the next tick uses the nominal step.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn baseline_rate(&self) -> f64 {
        self.baseline_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_nominal() {
        let mut clock = TickClock::new(Box::new(FixedClock::new(0.5)), 4.0);
        assert_eq!(clock.baseline_rate(), 4.0);
        assert_eq!(clock.next_dt(), 1.0);
        assert_eq!(clock.next_dt(), 2.0);
        assert_eq!(clock.next_dt(), 2.0);
    }

    #[test]
    fn scripted_intervals_are_scaled_without_smoothing() {
        let mut clock = TickClock::new(Box::new(ScriptedClock::new(vec![0.25, 3.0, 0.5])), 2.0);
        assert_eq!(clock.next_dt(), 1.0);
        assert_eq!(clock.next_dt(), 0.5);
        assert_eq!(clock.next_dt(), 6.0);
        assert_eq!(clock.next_dt(), 1.0);
        // last interval repeats
        assert_eq!(clock.next_dt(), 1.0);
    }

    #[test]
    fn reset_returns_to_nominal_step() {
        let mut clock = TickClock::new(Box::new(FixedClock::new(2.0)), 1.0);
        clock.next_dt();
        assert_eq!(clock.next_dt(), 2.0);
        clock.reset();
        assert_eq!(clock.next_dt(), 1.0);
        assert_eq!(clock.next_dt(), 2.0);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let mut source = SystemClock::new();
        let a = source.now();
        let b = source.now();
        assert!(b >= a);
    }
}
