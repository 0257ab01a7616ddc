//! Run report and utilization

use catmouse_config::SimulationConfig;
use catmouse_util::{format_secs_micros, RunId, Species};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::WaitTotals;

/// Bowl utilization in whole percent.
///
/// `total_eating` is the eating time summed over every eat event; the
/// denominator is the measured span times the number of bowls, both in
/// milliseconds. `None` when that product is zero.
pub fn utilization_percent(total_eating: Duration, span: Duration, bowls: usize) -> Option<u64> {
    let bowl_millis = span.as_millis() * bowls as u128;
    if bowl_millis == 0 {
        return None;
    }
    let percent = total_eating.as_millis() * 100 / bowl_millis;
    Some(u64::try_from(percent).unwrap_or(u64::MAX))
}

/// Eating time the configuration asks for across the whole run
pub fn total_eating_time(config: &SimulationConfig) -> Duration {
    Species::ALL
        .into_iter()
        .map(|species| {
            let per_actor = config.eat_duration(species).saturating_mul(config.loops);
            per_actor.saturating_mul(u32::try_from(config.population(species)).unwrap_or(u32::MAX))
        })
        .fold(Duration::ZERO, Duration::saturating_add)
}

/// Per-species results
#[derive(Debug, Clone, Serialize)]
pub struct SpeciesReport {
    pub species: Species,
    pub actors: usize,
    pub samples: u64,
    pub total_wait_us: u64,
    /// `None` when the species never ate
    pub mean_wait_us: Option<u64>,
    /// Most actors of this species seen eating at once
    pub peak_eating: usize,
}

impl SpeciesReport {
    pub fn new(species: Species, actors: usize, totals: &WaitTotals, peak_eating: usize) -> Self {
        Self {
            species,
            actors,
            samples: totals.samples(),
            total_wait_us: micros(totals.total()),
            mean_wait_us: totals.mean().map(micros),
            peak_eating,
        }
    }

    pub fn mean_wait(&self) -> Option<Duration> {
        self.mean_wait_us.map(Duration::from_micros)
    }
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub run_id: RunId,
    pub started_at: DateTime<Local>,
    pub policy: String,
    pub bowls: usize,
    pub loops: u32,
    pub span_ms: u64,
    pub utilization_percent: Option<u64>,
    pub cats: SpeciesReport,
    pub mice: SpeciesReport,
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(percent) = self.utilization_percent {
            writeln!(f, "Bowl utilization: {percent}%")?;
        }
        for report in [&self.cats, &self.mice] {
            if let Some(mean) = report.mean_wait() {
                writeln!(
                    f,
                    "Mean {} waiting time: {} seconds",
                    report.species,
                    format_secs_micros(mean)
                )?;
            }
        }
        write!(
            f,
            "Peak simultaneous eaters: {} cat(s), {} mouse/mice",
            self.cats.peak_eating, self.mice.peak_eating
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catmouse_config::Timing;
    use catmouse_util::TimeUnit;

    #[test]
    fn utilization_matches_formula() {
        // E = 1000 ms per event, K = 6 events, T = 4000 ms, B = 2
        let total = Duration::from_millis(1000) * 6;
        assert_eq!(
            utilization_percent(total, Duration::from_millis(4000), 2),
            Some(75)
        );
    }

    #[test]
    fn utilization_undefined_without_span_or_bowls() {
        assert_eq!(utilization_percent(Duration::from_secs(3), Duration::ZERO, 4), None);
        assert_eq!(
            utilization_percent(Duration::from_secs(3), Duration::from_micros(900), 4),
            None
        );
        assert_eq!(utilization_percent(Duration::from_secs(3), Duration::from_secs(1), 0), None);
    }

    #[test]
    fn total_eating_time_counts_every_actor() {
        let config = SimulationConfig::new(2, 3, 2, 4)
            .with_timing(Timing {
                cat_eat: 2,
                cat_sleep: 0,
                mouse_eat: 1,
                mouse_sleep: 0,
            })
            .with_time_unit(TimeUnit::from_millis(10));

        // (3 * 2 + 2 * 1) units * 4 loops * 10 ms
        assert_eq!(total_eating_time(&config), Duration::from_millis(320));
    }

    #[test]
    fn display_skips_species_without_samples() {
        let mut cat_totals = WaitTotals::default();
        cat_totals.add(Duration::new(2, 153_000));

        let report = SimulationReport {
            run_id: RunId::new(),
            started_at: catmouse_util::now(),
            policy: "species-turns".into(),
            bowls: 1,
            loops: 1,
            span_ms: 4000,
            utilization_percent: Some(25),
            cats: SpeciesReport::new(Species::Cat, 1, &cat_totals, 1),
            mice: SpeciesReport::new(Species::Mouse, 0, &WaitTotals::default(), 0),
        };

        let text = report.to_string();
        assert!(text.contains("Bowl utilization: 25%"));
        assert!(text.contains("Mean cat waiting time: 2.000153 seconds"));
        assert!(!text.contains("Mean mouse"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mice"]["mean_wait_us"], serde_json::Value::Null);
        assert_eq!(json["cats"]["samples"], 1);
    }
}
