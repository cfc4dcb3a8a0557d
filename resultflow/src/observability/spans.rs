//! Timing for stages and runs.

use std::time::{Duration, Instant};
use tracing::trace;

/// Wall-clock timer for one stage or run, reported as `duration_ms`.
#[derive(Debug, Clone, Copy)]
pub struct SpanTimer {
    label: &'static str,
    started: Instant,
}

impl SpanTimer {
    /// Starts timing `label`.
    #[must_use]
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            started: Instant::now(),
        }
    }

    /// The stage or style being timed.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Time since [`SpanTimer::start`].
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Fractional milliseconds since [`SpanTimer::start`].
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }

    /// Stops the timer and returns the elapsed milliseconds.
    #[must_use]
    pub fn finish(self) -> f64 {
        let duration_ms = self.elapsed_ms();
        trace!(label = self.label, duration_ms, "Timer finished");
        duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_measures_sleep() {
        let timer = SpanTimer::start("download_url");
        std::thread::sleep(Duration::from_millis(10));

        assert_eq!(timer.label(), "download_url");
        assert!(timer.elapsed() >= Duration::from_millis(10));
        assert!(timer.finish() >= 10.0);
    }

    #[test]
    fn test_copies_share_start() {
        let timer = SpanTimer::start("manual");
        let copy = timer;
        std::thread::sleep(Duration::from_millis(2));
        assert!(copy.elapsed_ms() >= 2.0);
        assert!(timer.elapsed_ms() >= 2.0);
    }
}
