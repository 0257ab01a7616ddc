//! Configuration parsing and validation for catmouse
//!
//! A run is configured either from positional values
//! (`BOWLS CATS MICE LOOPS [CAT_EAT CAT_SLEEP MOUSE_EAT MOUSE_SLEEP]`)
//! or from a versioned TOML scenario file. Both go through the same
//! validation, which reports every problem at once.

mod schema;
mod simulation;
mod validation;

pub use schema::*;
pub use simulation::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;

/// Current supported scenario file version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Usage text printed on any configuration error
pub const USAGE: &str = "\
Usage: catmouse NUM_BOWLS NUM_CATS NUM_MICE NUM_LOOPS
or
Usage: catmouse NUM_BOWLS NUM_CATS NUM_MICE NUM_LOOPS CAT_EATING_TIME CAT_SLEEPING_TIME MOUSE_EATING_TIME MOUSE_SLEEPING_TIME
or
Usage: catmouse --scenario FILE";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("expected 4 or 8 values, got {0}")]
    WrongArgumentCount(usize),

    #[error("{name} is not an integer: '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(errors))]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type ConfigResult<T> = Result<T, ConfigError>;

const ARG_NAMES: [&str; 8] = [
    "number of bowls",
    "number of cats",
    "number of mice",
    "number of loops",
    "cat eating time",
    "cat sleeping time",
    "mouse eating time",
    "mouse sleeping time",
];

/// Parse positional values (without the program name)
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> ConfigResult<SimulationConfig> {
    if args.len() != 4 && args.len() != 8 {
        return Err(ConfigError::WrongArgumentCount(args.len()));
    }

    let mut values = Vec::with_capacity(args.len());
    for (arg, name) in args.iter().zip(ARG_NAMES) {
        let arg = arg.as_ref();
        let value = arg.trim().parse::<i64>().map_err(|_| ConfigError::InvalidNumber {
            name,
            value: arg.to_string(),
        })?;
        values.push(value);
    }

    let timing = if values.len() == 8 {
        RawTiming {
            cat_eat: Some(values[4]),
            cat_sleep: Some(values[5]),
            mouse_eat: Some(values[6]),
            mouse_sleep: Some(values[7]),
        }
    } else {
        RawTiming::default()
    };

    let raw = RawConfig {
        config_version: CURRENT_CONFIG_VERSION,
        simulation: RawSimulation {
            bowls: values[0],
            cats: values[1],
            mice: values[2],
            loops: values[3],
        },
        timing,
        run: RawRun::default(),
    };

    from_raw(raw)
}

/// Load and validate a scenario from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<SimulationConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate a scenario from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<SimulationConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    from_raw(raw)
}

fn from_raw(raw: RawConfig) -> ConfigResult<SimulationConfig> {
    let errors = validate_config(&raw);
    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), "Configuration rejected");
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(SimulationConfig::from_raw(raw))
}
