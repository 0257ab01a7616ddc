//! Turn-taking policy
//!
//! Actors of one species share the bowls freely, one actor per bowl. The
//! other species waits until the bowls are empty. A species keeps its turn
//! until it has admitted `batch` actors while the other species is waiting;
//! after that it stops admitting and hands the turn over once its last
//! eater leaves, so neither species can starve the other.

use async_trait::async_trait;
use catmouse_policy_api::SyncPolicy;
use catmouse_util::{BowlId, Species};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use tracing::trace;

#[derive(Debug)]
struct TurnState {
    bowl_taken: Vec<bool>,
    /// Species currently holding (or last holding) the turn
    turn: Option<Species>,
    /// Actors between before_eating and after_eating
    eating: usize,
    /// Actors admitted since `turn` last changed
    admitted_this_turn: usize,
    waiting: [usize; 2],
}

impl TurnState {
    fn try_admit(&mut self, species: Species, bowl: BowlId, batch: usize) -> bool {
        let slot = bowl.index();
        if slot >= self.bowl_taken.len() {
            self.bowl_taken.resize(slot + 1, false);
        }
        if self.bowl_taken[slot] {
            return false;
        }

        let other_waiting = self.waiting[species.other().index()] > 0;
        let turn_spent =
            self.turn == Some(species) && other_waiting && self.admitted_this_turn >= batch;
        if turn_spent {
            return false;
        }

        if self.eating > 0 {
            if self.turn != Some(species) {
                return false;
            }
        } else if self.turn != Some(species) {
            self.turn = Some(species);
            self.admitted_this_turn = 0;
        }

        self.bowl_taken[slot] = true;
        self.eating += 1;
        self.admitted_this_turn += 1;
        true
    }

    fn release(&mut self, bowl: BowlId) {
        if let Some(taken) = self.bowl_taken.get_mut(bowl.index()) {
            *taken = false;
        }
        self.eating = self.eating.saturating_sub(1);
    }
}

/// Fair species alternation over shared bowls
#[derive(Debug)]
pub struct SpeciesTurns {
    state: Mutex<TurnState>,
    released: Notify,
    batch: usize,
}

impl SpeciesTurns {
    /// Policy for `bowls` bowls; a turn lasts `bowls` admissions under contention
    pub fn new(bowls: usize) -> Self {
        Self::with_batch(bowls, bowls)
    }

    pub fn with_batch(bowls: usize, batch: usize) -> Self {
        Self {
            state: Mutex::new(TurnState {
                bowl_taken: vec![false; bowls],
                turn: None,
                eating: 0,
                admitted_this_turn: 0,
                waiting: [0; 2],
            }),
            released: Notify::new(),
            batch: batch.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TurnState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Counts an actor as waiting until it is admitted or its wait is dropped
struct Waiting<'a> {
    policy: &'a SpeciesTurns,
    species: Species,
}

impl Drop for Waiting<'_> {
    fn drop(&mut self) {
        let mut state = self.policy.lock();
        state.waiting[self.species.index()] -= 1;
    }
}

#[async_trait]
impl SyncPolicy for SpeciesTurns {
    fn name(&self) -> &str {
        "species-turns"
    }

    async fn before_eating(&self, species: Species, bowl: BowlId) {
        let mut waiting: Option<Waiting<'_>> = None;

        loop {
            // Register for wakeups before checking, so a release between the
            // check and the await is not missed.
            let notified = self.released.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.lock();
                if state.try_admit(species, bowl, self.batch) {
                    trace!(%species, %bowl, eating = state.eating, "Admitted");
                    return;
                }
                if waiting.is_none() {
                    state.waiting[species.index()] += 1;
                    waiting = Some(Waiting {
                        policy: self,
                        species,
                    });
                }
            }

            notified.await;
        }
    }

    async fn after_eating(&self, species: Species, bowl: BowlId) {
        {
            let mut state = self.lock();
            state.release(bowl);
            trace!(%species, %bowl, eating = state.eating, "Released");
        }
        self.released.notify_waiters();
    }
}
