//! Scoped timing helpers.
//!
//! The caller wraps a unit of work explicitly; the duration is returned next
//! to the result and emitted as a `tracing` event. Nothing is accumulated in
//! global state.

use std::time::{Duration, Instant};

/// A timer started at construction and read on `finish`.
pub struct ScopedTimer {
    label: &'static str,
    start: Instant,
}

impl ScopedTimer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer, log the elapsed time and return it.
    pub fn finish(self) -> Duration {
        let elapsed = self.start.elapsed();
        tracing::debug!(label = self.label, elapsed = %describe(elapsed), "timed");
        elapsed
    }
}

/// Run `work` and return its result with the wall-clock time it took.
pub fn timed<T>(label: &'static str, work: impl FnOnce() -> T) -> (T, Duration) {
    let timer = ScopedTimer::start(label);
    let out = work();
    (out, timer.finish())
}

/// Human-readable duration: seconds below a minute, then mins/s, then hrs/mins/s.
pub fn describe(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 60.0 {
        format!("{secs:.3} s")
    } else if secs < 3600.0 {
        let mins = (secs / 60.0).floor();
        format!("{mins:.0} mins {:.1} s", secs - 60.0 * mins)
    } else {
        let hrs = (secs / 3600.0).floor();
        let mins = ((secs - 3600.0 * hrs) / 60.0).floor();
        format!(
            "{hrs:.0} hrs {mins:.0} mins {:.1} s",
            secs - 3600.0 * hrs - 60.0 * mins
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_returns_result_and_duration() {
        let (value, elapsed) = timed("sum", || (1..=10).sum::<u32>());
        assert_eq!(value, 55);
        assert!(elapsed <= Duration::from_secs(5));
    }

    #[test]
    fn describe_formats() {
        assert_eq!(describe(Duration::from_millis(1500)), "1.500 s");
        assert_eq!(describe(Duration::from_secs(125)), "2 mins 5.0 s");
        assert_eq!(describe(Duration::from_secs(3725)), "1 hrs 2 mins 5.0 s");
    }

    #[test]
    fn scoped_timer_keeps_label() {
        let t = ScopedTimer::start("label");
        assert_eq!(t.label(), "label");
        let _ = t.finish();
    }
}
