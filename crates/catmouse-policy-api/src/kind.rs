//! Names of the available synchronization policies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Selects which policy drives a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// No admission control at all
    Unsynchronized,
    /// One actor eats at a time
    SingleEater,
    /// Species take turns; same-species actors share the bowls
    #[default]
    SpeciesTurns,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::Unsynchronized,
        PolicyKind::SingleEater,
        PolicyKind::SpeciesTurns,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Unsynchronized => "unsynchronized",
            PolicyKind::SingleEater => "single-eater",
            PolicyKind::SpeciesTurns => "species-turns",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown policy '{0}'")]
pub struct UnknownPolicy(pub String);

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}
