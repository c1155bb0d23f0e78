//! Stopwatch driven by caller-supplied instants.
//!
//! The polling loop passes the same `now` to every timer in a tick, which keeps
//! the cadences consistent with each other and lets tests use synthetic time.

use std::time::{Duration, Instant};

/// Stopwatch that is either stopped at zero or running since an instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
}

impl Stopwatch {
    /// A stopped stopwatch with zero elapsed.
    pub const fn new() -> Self {
        Self { started_at: None }
    }

    /// A stopwatch running since `now`.
    pub const fn started(now: Instant) -> Self {
        Self {
            started_at: Some(now),
        }
    }

    pub const fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.started_at
            .map_or(Duration::ZERO, |start| now.saturating_duration_since(start))
    }

    /// Elapsed time as fractional milliseconds.
    pub fn elapsed_ms(&self, now: Instant) -> f64 {
        self.elapsed(now).as_secs_f64() * 1000.0
    }

    /// Stop and zero.
    pub fn reset(&mut self) {
        self.started_at = None;
    }

    /// Zero and start running from `now`.
    pub fn restart(&mut self, now: Instant) {
        self.started_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_is_stopped() {
        let now = Instant::now();
        let sw = Stopwatch::new();
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed(now + ms(100)), Duration::ZERO);
    }

    #[test]
    fn test_restart_and_reset() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::started(t0);
        assert_eq!(sw.elapsed(t0 + ms(40)), ms(40));

        sw.restart(t0 + ms(40));
        assert_eq!(sw.elapsed(t0 + ms(50)), ms(10));

        sw.reset();
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed(t0 + ms(90)), Duration::ZERO);
    }

    #[test]
    fn test_elapsed_before_start_is_zero() {
        let t0 = Instant::now();
        let sw = Stopwatch::started(t0 + ms(10));
        assert_eq!(sw.elapsed(t0), Duration::ZERO);
    }
}
