//! Error types for the core

use catmouse_config::ConfigError;
use catmouse_util::{ActorId, BowlId, Species};
use thiserror::Error;

use crate::BowlState;

/// A breach of the bowl invariants.
///
/// These are defects in the synchronization policy under test, never
/// recoverable conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("bowl {bowl} does not exist (bowls are numbered 1..={bowls})")]
    BowlOutOfRange { bowl: usize, bowls: usize },

    #[error("attempt to make a {species} eat from bowl {bowl}, which a {occupant} is using")]
    DoubleOccupancy {
        bowl: BowlId,
        species: Species,
        occupant: Species,
    },

    #[error("attempt to make a {species} eat at bowl {bowl} while {eating} {other}(s) are eating", other = .species.other())]
    SpeciesMixing {
        bowl: BowlId,
        species: Species,
        eating: usize,
    },

    #[error("{species} leaving bowl {bowl} but the bowl is {found}")]
    NotOccupant {
        bowl: BowlId,
        species: Species,
        found: BowlState,
    },

    #[error("{species} leaving bowl {bowl} while no {species} is counted as eating")]
    CounterUnderflow { bowl: BowlId, species: Species },

    #[error("{species} counter is {counter} but {occupied} bowl(s) hold a {species}")]
    CounterMismatch {
        species: Species,
        counter: usize,
        occupied: usize,
    },

    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),
}

fn by_actor(actor: &Option<ActorId>) -> String {
    match actor {
        Some(actor) => format!(" by {actor}"),
        None => " at teardown".to_string(),
    }
}

/// Why a run did not complete
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invariant violated{}: {violation}", by_actor(.actor))]
    Invariant {
        actor: Option<ActorId>,
        violation: InvariantViolation,
    },

    #[error("actor task failed: {0}")]
    ActorFailed(String),
}

impl RunError {
    pub fn invariant(actor: Option<ActorId>, violation: InvariantViolation) -> Self {
        Self::Invariant { actor, violation }
    }

    /// The violation behind this error, if it is one
    pub fn violation(&self) -> Option<&InvariantViolation> {
        match self {
            Self::Invariant { violation, .. } => Some(violation),
            _ => None,
        }
    }
}
