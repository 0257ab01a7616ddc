//! Arbitration mutex around the bowl state store

use catmouse_util::{BowlId, Species};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::{BowlStore, InvariantViolation};

/// Serializes every read and write of the [`BowlStore`].
///
/// The lock is held only for the check-and-update of a single transition,
/// never across a delay or a policy hook.
#[derive(Debug)]
pub struct Arbiter {
    store: Mutex<BowlStore>,
}

impl Arbiter {
    pub fn new(bowls: usize) -> Self {
        Self {
            store: Mutex::new(BowlStore::new(bowls)),
        }
    }

    pub fn occupy(&self, bowl: BowlId, species: Species) -> Result<(), InvariantViolation> {
        let mut store = self.lock()?;
        store.occupy(bowl, species)?;
        debug_assert!(store.audit().is_ok(), "counters out of step with bowls");
        debug!(
            %species,
            %bowl,
            cats = store.eating(Species::Cat),
            mice = store.eating(Species::Mouse),
            bowls = %store.render(),
            "Started eating"
        );
        Ok(())
    }

    pub fn vacate(&self, bowl: BowlId, species: Species) -> Result<(), InvariantViolation> {
        let mut store = self.lock()?;
        store.vacate(bowl, species)?;
        debug_assert!(store.audit().is_ok(), "counters out of step with bowls");
        debug!(
            %species,
            %bowl,
            cats = store.eating(Species::Cat),
            mice = store.eating(Species::Mouse),
            bowls = %store.render(),
            "Finished eating"
        );
        Ok(())
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Result<BowlStore, InvariantViolation> {
        Ok(self.lock()?.clone())
    }

    /// Verify the store is consistent and every bowl is empty
    pub fn audit_idle(&self) -> Result<BowlStore, InvariantViolation> {
        let store = self.lock()?;
        store.audit()?;
        for species in Species::ALL {
            let counter = store.eating(species);
            if counter != 0 {
                return Err(InvariantViolation::CounterMismatch {
                    species,
                    counter,
                    occupied: 0,
                });
            }
        }
        Ok(store.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BowlStore>, InvariantViolation> {
        self.store
            .lock()
            .map_err(|_| InvariantViolation::LockPoisoned("bowl"))
    }
}
