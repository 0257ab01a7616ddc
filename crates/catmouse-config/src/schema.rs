//! Raw configuration schema (as parsed from TOML or positional arguments)

use serde::{Deserialize, Serialize};

/// Raw configuration before validation.
///
/// Counts are signed so that negative input reaches validation and is
/// reported with its value instead of failing inside the parser.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Population and bowl counts
    pub simulation: RawSimulation,

    /// Eating and sleeping times, in time units
    #[serde(default)]
    pub timing: RawTiming,

    /// Run settings that do not change the problem itself
    #[serde(default)]
    pub run: RawRun,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawSimulation {
    pub bowls: i64,
    pub cats: i64,
    pub mice: i64,
    pub loops: i64,
}

/// Missing values fall back to eat=1, sleep=2
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTiming {
    pub cat_eat: Option<i64>,
    pub cat_sleep: Option<i64>,
    pub mouse_eat: Option<i64>,
    pub mouse_sleep: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRun {
    /// Synchronization policy name (default: species-turns)
    pub policy: Option<String>,

    /// Seed for bowl choices; random when absent
    pub seed: Option<u64>,

    /// Wall-clock milliseconds per time unit (default: 1000)
    pub time_unit_ms: Option<u64>,
}
