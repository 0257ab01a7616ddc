//! Configuration validation

use crate::schema::RawConfig;
use catmouse_policy_api::PolicyKind;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid number of bowls: {0}")]
    InvalidBowls(i64),

    #[error("invalid number of cats: {0}")]
    InvalidCats(i64),

    #[error("invalid number of mice: {0}")]
    InvalidMice(i64),

    #[error("invalid number of loops: {0}")]
    InvalidLoops(i64),

    #[error("invalid {field}: {value}")]
    InvalidTiming { field: &'static str, value: i64 },

    #[error("unknown policy '{0}'")]
    UnknownPolicy(String),
}

/// Validate a raw configuration, collecting every problem found
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let sim = &config.simulation;

    if sim.bowls <= 0 || usize::try_from(sim.bowls).is_err() {
        errors.push(ValidationError::InvalidBowls(sim.bowls));
    }
    if sim.cats < 0 || usize::try_from(sim.cats).is_err() {
        errors.push(ValidationError::InvalidCats(sim.cats));
    }
    if sim.mice < 0 || usize::try_from(sim.mice).is_err() {
        errors.push(ValidationError::InvalidMice(sim.mice));
    }
    if sim.loops <= 0 || u32::try_from(sim.loops).is_err() {
        errors.push(ValidationError::InvalidLoops(sim.loops));
    }

    let timing = &config.timing;
    let fields = [
        ("cat eating time", timing.cat_eat),
        ("cat sleeping time", timing.cat_sleep),
        ("mouse eating time", timing.mouse_eat),
        ("mouse sleeping time", timing.mouse_sleep),
    ];
    for (field, value) in fields {
        if let Some(value) = value
            && u32::try_from(value).is_err()
        {
            errors.push(ValidationError::InvalidTiming { field, value });
        }
    }

    if let Some(name) = &config.run.policy
        && name.parse::<PolicyKind>().is_err()
    {
        errors.push(ValidationError::UnknownPolicy(name.clone()));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{RawRun, RawSimulation, RawTiming};

    fn raw(bowls: i64, cats: i64, mice: i64, loops: i64) -> RawConfig {
        RawConfig {
            config_version: 1,
            simulation: RawSimulation {
                bowls,
                cats,
                mice,
                loops,
            },
            timing: RawTiming::default(),
            run: RawRun::default(),
        }
    }

    #[test]
    fn accepts_zero_actors() {
        assert!(validate_config(&raw(1, 0, 0, 1)).is_empty());
    }

    #[test]
    fn rejects_zero_bowls_and_loops() {
        let errors = validate_config(&raw(0, 1, 1, 0));
        assert_eq!(
            errors,
            vec![ValidationError::InvalidBowls(0), ValidationError::InvalidLoops(0)]
        );
    }

    #[test]
    fn collects_every_negative_count() {
        let errors = validate_config(&raw(-1, -2, -3, -4));
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::InvalidMice(-3)));
    }

    #[test]
    fn rejects_negative_timing() {
        let mut config = raw(2, 1, 1, 1);
        config.timing.mouse_sleep = Some(-5);
        config.timing.cat_eat = Some(0);

        let errors = validate_config(&config);
        assert_eq!(
            errors,
            vec![ValidationError::InvalidTiming {
                field: "mouse sleeping time",
                value: -5
            }]
        );
    }

    #[test]
    fn rejects_unknown_policy() {
        let mut config = raw(2, 1, 1, 1);
        config.run.policy = Some("round-robin".into());

        let errors = validate_config(&config);
        assert!(matches!(&errors[..], [ValidationError::UnknownPolicy(name)] if name == "round-robin"));
    }
}
