//! Stopwatch for per-module, per-batch and per-run timing.

use std::time::Instant;

use chrono::{DateTime, Local};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Not shared across threads; one timer per timed scope.
#[derive(Debug, Clone)]
pub struct Timer {
    name: String,
    started: Option<Instant>,
    ended: Option<Instant>,
}

impl Timer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started: None,
            ended: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start (or restart) the timer and return the formatted start time.
    pub fn start(&mut self) -> String {
        self.started = Some(Instant::now());
        self.ended = None;
        format_timestamp(Local::now())
    }

    /// Stop the timer; returns the formatted end time and elapsed seconds.
    /// Ending a timer that was never started reports zero elapsed time.
    pub fn end(&mut self) -> (String, f64) {
        self.ended = Some(Instant::now());
        (format_timestamp(Local::now()), self.duration())
    }

    /// Seconds between start and end, `0.0` unless both are recorded.
    pub fn duration(&self) -> f64 {
        match (self.started, self.ended) {
            (Some(s), Some(e)) => e.saturating_duration_since(s).as_secs_f64(),
            _ => 0.0,
        }
    }
}

pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    #[test]
    fn timestamp_has_millisecond_precision() {
        let at = Local.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap()
            + chrono::Duration::milliseconds(89);
        assert_eq!(format_timestamp(at), "2026-03-04 05:06:07.089");
    }

    #[test]
    fn duration_is_zero_until_ended() {
        let mut t = Timer::new("batch");
        assert_eq!(t.duration(), 0.0);
        t.start();
        assert_eq!(t.duration(), 0.0);
        std::thread::sleep(Duration::from_millis(5));
        let (ts, secs) = t.end();
        assert_eq!(ts.len(), "2026-03-04 05:06:07.089".len());
        assert!(secs >= 0.005, "elapsed {secs}");
        assert_eq!(secs, t.duration());
        assert_eq!(t.name(), "batch");
    }

    #[test]
    fn end_without_start_reports_zero() {
        let mut t = Timer::new("never started");
        let (_, secs) = t.end();
        assert_eq!(secs, 0.0);
    }
}
