//! Strongly-typed identifiers for catmouse

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One of the two populations contending for bowls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Cat,
    Mouse,
}

impl Species {
    pub const ALL: [Species; 2] = [Species::Cat, Species::Mouse];

    /// The species that may never eat at the same time as this one
    pub fn other(self) -> Species {
        match self {
            Species::Cat => Species::Mouse,
            Species::Mouse => Species::Cat,
        }
    }

    /// Dense index for per-species arrays
    pub fn index(self) -> usize {
        match self {
            Species::Cat => 0,
            Species::Mouse => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Species::Cat => "cat",
            Species::Mouse => "mouse",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bowl number in `1..=bowls`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BowlId(usize);

impl BowlId {
    /// Returns `None` for zero; bowls are numbered from one.
    pub fn new(number: usize) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    /// Bowl for a zero-based slot index
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    pub fn get(&self) -> usize {
        self.0
    }

    /// Zero-based slot index
    pub fn index(&self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for BowlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a single simulated actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId {
    pub species: Species,
    pub index: usize,
}

impl ActorId {
    pub fn new(species: Species, index: usize) -> Self {
        Self { species, index }
    }

    pub fn cat(index: usize) -> Self {
        Self::new(Species::Cat, index)
    }

    pub fn mouse(index: usize) -> Self {
        Self::new(Species::Mouse, index)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.species, self.index)
    }
}

/// Unique identifier for one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bowl_ids_start_at_one() {
        assert!(BowlId::new(0).is_none());
        let bowl = BowlId::new(3).unwrap();
        assert_eq!(bowl.get(), 3);
        assert_eq!(bowl.index(), 2);
        assert_eq!(BowlId::from_index(2), bowl);
    }

    #[test]
    fn species_other_is_symmetric() {
        for species in Species::ALL {
            assert_ne!(species, species.other());
            assert_eq!(species, species.other().other());
        }
    }

    #[test]
    fn run_id_uniqueness() {
        assert_ne!(RunId::new(), RunId::new());
    }

    #[test]
    fn ids_serialize_deserialize() {
        let json = serde_json::to_string(&Species::Mouse).unwrap();
        assert_eq!(json, "\"mouse\"");
        let parsed: Species = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Species::Mouse);

        let actor = ActorId::cat(4);
        let json = serde_json::to_string(&actor).unwrap();
        let parsed: ActorId = serde_json::from_str(&json).unwrap();
        assert_eq!(actor, parsed);
        assert_eq!(actor.to_string(), "cat-4");
    }
}
