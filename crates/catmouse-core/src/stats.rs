//! Wait-time statistics

use catmouse_util::{Species, NANOS_PER_SEC};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::InvariantViolation;

/// Accumulated wait before eating for one species
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaitTotals {
    secs: u64,
    /// Always below one second
    nanos: u32,
    samples: u64,
}

impl WaitTotals {
    pub fn add(&mut self, wait: Duration) {
        self.secs += wait.as_secs();
        self.nanos += wait.subsec_nanos();
        if self.nanos >= NANOS_PER_SEC {
            self.nanos -= NANOS_PER_SEC;
            self.secs += 1;
        }
        self.samples += 1;
    }

    pub fn total(&self) -> Duration {
        Duration::new(self.secs, self.nanos)
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Mean wait, or `None` without samples
    pub fn mean(&self) -> Option<Duration> {
        if self.samples == 0 {
            return None;
        }
        let nanos = self.total().as_nanos() / u128::from(self.samples);
        Some(Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX)))
    }

    /// Seconds and sub-second nanoseconds of the total
    pub fn parts(&self) -> (u64, u32) {
        (self.secs, self.nanos)
    }
}

/// Per-species wait totals behind a lock of their own, separate from the
/// arbitration lock.
#[derive(Debug, Default)]
pub struct WaitStats {
    totals: Mutex<[WaitTotals; 2]>,
}

impl WaitStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, species: Species, wait: Duration) -> Result<(), InvariantViolation> {
        self.lock()?[species.index()].add(wait);
        Ok(())
    }

    /// Totals for `species`; meaningful once every actor has finished
    pub fn snapshot(&self, species: Species) -> Result<WaitTotals, InvariantViolation> {
        Ok(self.lock()?[species.index()])
    }

    fn lock(&self) -> Result<MutexGuard<'_, [WaitTotals; 2]>, InvariantViolation> {
        self.totals
            .lock()
            .map_err(|_| InvariantViolation::LockPoisoned("stats"))
    }
}
