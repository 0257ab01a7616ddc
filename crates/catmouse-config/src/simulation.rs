//! Validated simulation settings

use crate::schema::{RawConfig, RawRun, RawSimulation, RawTiming};
use crate::{ConfigError, ConfigResult, ValidationError, CURRENT_CONFIG_VERSION};
use catmouse_policy_api::PolicyKind;
use catmouse_util::{Species, TimeUnit};
use std::time::Duration;

pub const DEFAULT_EAT_TIME: u32 = 1;
pub const DEFAULT_SLEEP_TIME: u32 = 2;

/// Eating and sleeping times per species, in time units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub cat_eat: u32,
    pub cat_sleep: u32,
    pub mouse_eat: u32,
    pub mouse_sleep: u32,
}

impl Timing {
    pub fn eat_units(&self, species: Species) -> u32 {
        match species {
            Species::Cat => self.cat_eat,
            Species::Mouse => self.mouse_eat,
        }
    }

    pub fn sleep_units(&self, species: Species) -> u32 {
        match species {
            Species::Cat => self.cat_sleep,
            Species::Mouse => self.mouse_sleep,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            cat_eat: DEFAULT_EAT_TIME,
            cat_sleep: DEFAULT_SLEEP_TIME,
            mouse_eat: DEFAULT_EAT_TIME,
            mouse_sleep: DEFAULT_SLEEP_TIME,
        }
    }
}

/// Configuration for one simulation run. Immutable once the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub bowls: usize,
    pub cats: usize,
    pub mice: usize,
    /// Number of times each cat and mouse eats
    pub loops: u32,
    pub timing: Timing,
    pub time_unit: TimeUnit,
    pub seed: Option<u64>,
    pub policy: PolicyKind,
}

impl SimulationConfig {
    /// Configuration with default timing, one-second units and a random seed
    pub fn new(bowls: usize, cats: usize, mice: usize, loops: u32) -> Self {
        Self {
            bowls,
            cats,
            mice,
            loops,
            timing: Timing::default(),
            time_unit: TimeUnit::default(),
            seed: None,
            policy: PolicyKind::default(),
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.time_unit = time_unit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Convert from raw config (after validation)
    pub(crate) fn from_raw(raw: RawConfig) -> Self {
        let units = |value: Option<i64>, default: u32| {
            value.and_then(|v| u32::try_from(v).ok()).unwrap_or(default)
        };

        let timing = Timing {
            cat_eat: units(raw.timing.cat_eat, DEFAULT_EAT_TIME),
            cat_sleep: units(raw.timing.cat_sleep, DEFAULT_SLEEP_TIME),
            mouse_eat: units(raw.timing.mouse_eat, DEFAULT_EAT_TIME),
            mouse_sleep: units(raw.timing.mouse_sleep, DEFAULT_SLEEP_TIME),
        };

        let time_unit = raw
            .run
            .time_unit_ms
            .map(TimeUnit::from_millis)
            .unwrap_or_default();

        let policy = raw
            .run
            .policy
            .as_deref()
            .and_then(|name| name.parse().ok())
            .unwrap_or_default();

        Self {
            bowls: raw.simulation.bowls as usize,
            cats: raw.simulation.cats as usize,
            mice: raw.simulation.mice as usize,
            loops: raw.simulation.loops as u32,
            timing,
            time_unit,
            seed: raw.run.seed,
            policy,
        }
    }

    /// Check the invariants a hand-built config can still break
    pub fn validate(&self) -> ConfigResult<()> {
        let mut errors = Vec::new();
        if self.bowls == 0 {
            errors.push(ValidationError::InvalidBowls(0));
        }
        if self.loops == 0 {
            errors.push(ValidationError::InvalidLoops(0));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationFailed { errors })
        }
    }

    /// Number of actors spawned by a run
    pub fn actor_count(&self) -> usize {
        self.cats + self.mice
    }

    pub fn population(&self, species: Species) -> usize {
        match species {
            Species::Cat => self.cats,
            Species::Mouse => self.mice,
        }
    }

    pub fn eat_duration(&self, species: Species) -> Duration {
        self.time_unit.scale(self.timing.eat_units(species))
    }

    pub fn sleep_duration(&self, species: Species) -> Duration {
        self.time_unit.scale(self.timing.sleep_units(species))
    }

    /// Raw form of this config, e.g. for writing a scenario file
    pub fn to_raw(&self) -> RawConfig {
        RawConfig {
            config_version: CURRENT_CONFIG_VERSION,
            simulation: RawSimulation {
                bowls: self.bowls as i64,
                cats: self.cats as i64,
                mice: self.mice as i64,
                loops: i64::from(self.loops),
            },
            timing: RawTiming {
                cat_eat: Some(i64::from(self.timing.cat_eat)),
                cat_sleep: Some(i64::from(self.timing.cat_sleep)),
                mouse_eat: Some(i64::from(self.timing.mouse_eat)),
                mouse_sleep: Some(i64::from(self.timing.mouse_sleep)),
            },
            run: RawRun {
                policy: Some(self.policy.to_string()),
                seed: self.seed,
                time_unit_ms: Some(
                    u64::try_from(self.time_unit.as_duration().as_millis()).unwrap_or(u64::MAX),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_follow_time_unit() {
        let config = SimulationConfig::new(2, 1, 1, 1)
            .with_timing(Timing {
                cat_eat: 3,
                cat_sleep: 0,
                mouse_eat: 1,
                mouse_sleep: 4,
            })
            .with_time_unit(TimeUnit::from_millis(10));

        assert_eq!(config.eat_duration(Species::Cat), Duration::from_millis(30));
        assert_eq!(config.sleep_duration(Species::Cat), Duration::ZERO);
        assert_eq!(config.sleep_duration(Species::Mouse), Duration::from_millis(40));
    }

    #[test]
    fn hand_built_config_validation() {
        assert!(SimulationConfig::new(1, 0, 0, 1).validate().is_ok());
        assert!(matches!(
            SimulationConfig::new(0, 1, 1, 0).validate(),
            Err(ConfigError::ValidationFailed { errors }) if errors.len() == 2
        ));
    }

    #[test]
    fn oversized_time_unit_saturates_in_raw_form() {
        let config = SimulationConfig::new(1, 1, 1, 1).with_time_unit(TimeUnit::new(Duration::MAX));
        assert_eq!(config.to_raw().run.time_unit_ms, Some(u64::MAX));

        let config = SimulationConfig::new(1, 1, 1, 1).with_time_unit(TimeUnit::from_millis(7));
        assert_eq!(config.to_raw().run.time_unit_ms, Some(7));
    }
}
