//! Time utilities for catmouse
//!
//! Monotonic time is used for every measurement (wait times, run span);
//! wall-clock time only stamps the report.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Current wall-clock time
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Represents a point in monotonic time.
/// This is immune to wall-clock changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonotonicInstant(Instant);

impl MonotonicInstant {
    pub fn now() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// Wall-clock length of one configured time unit.
///
/// Eating and sleeping times are configured as whole units; the harness
/// historically used one second, tests use a few milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeUnit(Duration);

impl TimeUnit {
    pub const SECOND: TimeUnit = TimeUnit(Duration::from_secs(1));

    pub fn new(unit: Duration) -> Self {
        Self(unit)
    }

    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Wall-clock duration of `units` time units
    pub fn scale(&self, units: u32) -> Duration {
        self.0.saturating_mul(units)
    }
}

impl Default for TimeUnit {
    fn default() -> Self {
        Self::SECOND
    }
}

/// Format a duration as `seconds.microseconds`, e.g. `2.000153`
pub fn format_secs_micros(duration: Duration) -> String {
    format!("{}.{:06}", duration.as_secs(), duration.subsec_micros())
}
