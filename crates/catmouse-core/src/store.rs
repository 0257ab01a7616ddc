//! Bowl state store
//!
//! Plain state and invariant checks; callers serialize access through the
//! [`Arbiter`](crate::Arbiter).

use catmouse_util::{BowlId, Species};
use std::fmt;

use crate::InvariantViolation;

/// Occupancy of a single bowl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BowlState {
    #[default]
    Empty,
    Occupied(Species),
}

impl BowlState {
    /// One-character form used in bowl traces: `-`, `c` or `m`
    pub fn symbol(&self) -> char {
        match self {
            BowlState::Empty => '-',
            BowlState::Occupied(Species::Cat) => 'c',
            BowlState::Occupied(Species::Mouse) => 'm',
        }
    }
}

impl fmt::Display for BowlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BowlState::Empty => f.write_str("empty"),
            BowlState::Occupied(species) => write!(f, "occupied by a {species}"),
        }
    }
}

/// Per-bowl occupancy plus the system-wide count of eaters per species.
///
/// Invariants:
/// 1. a bowl only goes Empty -> Occupied -> Empty
/// 2. a species may not start eating while the other has any eater
/// 3. each counter equals the number of bowls its species occupies
///
/// `occupy` and `vacate` reject any transition breaking 1 or 2; 3 is
/// verified by [`BowlStore::audit`].
#[derive(Debug, Clone)]
pub struct BowlStore {
    bowls: Vec<BowlState>,
    eating: [usize; 2],
    peak: [usize; 2],
}

impl BowlStore {
    pub fn new(bowls: usize) -> Self {
        Self {
            bowls: vec![BowlState::Empty; bowls],
            eating: [0; 2],
            peak: [0; 2],
        }
    }

    pub fn bowl_count(&self) -> usize {
        self.bowls.len()
    }

    /// Actors of `species` currently mid-eat
    pub fn eating(&self, species: Species) -> usize {
        self.eating[species.index()]
    }

    /// Highest number of simultaneous `species` eaters seen so far
    pub fn peak(&self, species: Species) -> usize {
        self.peak[species.index()]
    }

    pub fn state(&self, bowl: BowlId) -> Option<BowlState> {
        self.bowls.get(bowl.index()).copied()
    }

    /// Start `species` eating at `bowl`
    pub fn occupy(&mut self, bowl: BowlId, species: Species) -> Result<(), InvariantViolation> {
        let slot = self.slot(bowl)?;

        if let BowlState::Occupied(occupant) = self.bowls[slot] {
            return Err(InvariantViolation::DoubleOccupancy {
                bowl,
                species,
                occupant,
            });
        }

        let others = self.eating[species.other().index()];
        if others > 0 {
            return Err(InvariantViolation::SpeciesMixing {
                bowl,
                species,
                eating: others,
            });
        }

        let count = &mut self.eating[species.index()];
        *count += 1;
        let peak = &mut self.peak[species.index()];
        *peak = (*peak).max(*count);
        self.bowls[slot] = BowlState::Occupied(species);
        Ok(())
    }

    /// Finish `species` eating at `bowl`
    pub fn vacate(&mut self, bowl: BowlId, species: Species) -> Result<(), InvariantViolation> {
        let slot = self.slot(bowl)?;

        if self.eating[species.index()] == 0 {
            return Err(InvariantViolation::CounterUnderflow { bowl, species });
        }

        let found = self.bowls[slot];
        if found != BowlState::Occupied(species) {
            return Err(InvariantViolation::NotOccupant {
                bowl,
                species,
                found,
            });
        }

        self.eating[species.index()] -= 1;
        self.bowls[slot] = BowlState::Empty;
        Ok(())
    }

    /// Full consistency check: counters against bowl contents, and at most
    /// one species eating.
    pub fn audit(&self) -> Result<(), InvariantViolation> {
        for species in Species::ALL {
            let occupied = self
                .bowls
                .iter()
                .filter(|state| **state == BowlState::Occupied(species))
                .count();
            let counter = self.eating(species);
            if counter != occupied {
                return Err(InvariantViolation::CounterMismatch {
                    species,
                    counter,
                    occupied,
                });
            }
        }
        Ok(())
    }

    /// Whether every bowl is empty
    pub fn is_idle(&self) -> bool {
        self.eating == [0, 0] && self.bowls.iter().all(|b| *b == BowlState::Empty)
    }

    /// Bowl row as symbols, e.g. `c-c-`
    pub fn render(&self) -> String {
        self.bowls.iter().map(BowlState::symbol).collect()
    }

    fn slot(&self, bowl: BowlId) -> Result<usize, InvariantViolation> {
        let slot = bowl.index();
        if slot < self.bowls.len() {
            Ok(slot)
        } else {
            Err(InvariantViolation::BowlOutOfRange {
                bowl: bowl.get(),
                bowls: self.bowls.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bowl(n: usize) -> BowlId {
        BowlId::new(n).unwrap()
    }

    #[test]
    fn occupy_then_vacate_restores_state() {
        let mut store = BowlStore::new(2);

        store.occupy(bowl(2), Species::Mouse).unwrap();
        assert_eq!(store.state(bowl(2)), Some(BowlState::Occupied(Species::Mouse)));
        assert_eq!(store.eating(Species::Mouse), 1);
        assert_eq!(store.render(), "-m");

        store.vacate(bowl(2), Species::Mouse).unwrap();
        assert_eq!(store.state(bowl(2)), Some(BowlState::Empty));
        assert_eq!(store.eating(Species::Mouse), 0);
        assert!(store.is_idle());
        assert_eq!(store.peak(Species::Mouse), 1);
    }

    #[test]
    fn same_species_shares_distinct_bowls() {
        let mut store = BowlStore::new(3);
        for n in 1..=3 {
            store.occupy(bowl(n), Species::Cat).unwrap();
        }
        assert_eq!(store.eating(Species::Cat), 3);
        assert_eq!(store.peak(Species::Cat), 3);
        assert!(store.audit().is_ok());
    }

    #[test]
    fn double_occupancy_is_rejected() {
        let mut store = BowlStore::new(1);
        store.occupy(bowl(1), Species::Cat).unwrap();

        let err = store.occupy(bowl(1), Species::Cat).unwrap_err();
        assert_eq!(
            err,
            InvariantViolation::DoubleOccupancy {
                bowl: bowl(1),
                species: Species::Cat,
                occupant: Species::Cat,
            }
        );
        // State is untouched by the failed attempt.
        assert_eq!(store.eating(Species::Cat), 1);
    }

    #[test]
    fn occupied_bowl_is_reported_before_species_mixing() {
        let mut store = BowlStore::new(1);
        store.occupy(bowl(1), Species::Mouse).unwrap();

        let err = store.occupy(bowl(1), Species::Cat).unwrap_err();
        assert!(matches!(
            err,
            InvariantViolation::DoubleOccupancy {
                occupant: Species::Mouse,
                ..
            }
        ));
    }

    #[test]
    fn species_exclusivity_is_global() {
        let mut store = BowlStore::new(4);
        store.occupy(bowl(1), Species::Mouse).unwrap();

        let err = store.occupy(bowl(4), Species::Cat).unwrap_err();
        assert_eq!(
            err,
            InvariantViolation::SpeciesMixing {
                bowl: bowl(4),
                species: Species::Cat,
                eating: 1,
            }
        );
        assert_eq!(store.state(bowl(4)), Some(BowlState::Empty));
    }

    #[test]
    fn vacate_checks_counter_and_occupant() {
        let mut store = BowlStore::new(2);
        assert!(matches!(
            store.vacate(bowl(1), Species::Cat),
            Err(InvariantViolation::CounterUnderflow { .. })
        ));

        store.occupy(bowl(1), Species::Cat).unwrap();
        assert_eq!(
            store.vacate(bowl(2), Species::Cat),
            Err(InvariantViolation::NotOccupant {
                bowl: bowl(2),
                species: Species::Cat,
                found: BowlState::Empty,
            })
        );
    }

    #[test]
    fn out_of_range_bowl() {
        let mut store = BowlStore::new(2);
        assert_eq!(
            store.occupy(bowl(3), Species::Cat),
            Err(InvariantViolation::BowlOutOfRange { bowl: 3, bowls: 2 })
        );
    }

    #[test]
    fn violation_messages_name_bowl_and_species() {
        let err = InvariantViolation::SpeciesMixing {
            bowl: bowl(2),
            species: Species::Cat,
            eating: 3,
        };
        assert_eq!(
            err.to_string(),
            "attempt to make a cat eat at bowl 2 while 3 mouse(s) are eating"
        );
    }
}
