//! Reference synchronization policies for catmouse
//!
//! Provides:
//! - `Unsynchronized`: no admission control (breaks the invariants on purpose)
//! - `SingleEater`: one actor at a time
//! - `SpeciesTurns`: same-species actors share bowls, species alternate turns

mod single_eater;
mod species_turns;
mod unsynchronized;

pub use single_eater::*;
pub use species_turns::*;
pub use unsynchronized::*;

use catmouse_policy_api::{PolicyKind, SyncPolicy};
use std::sync::Arc;

/// Build the policy named by `kind` for a run with `bowls` bowls
pub fn build_policy(kind: PolicyKind, bowls: usize) -> Arc<dyn SyncPolicy> {
    tracing::debug!(policy = %kind, bowls, "Building synchronization policy");
    match kind {
        PolicyKind::Unsynchronized => Arc::new(Unsynchronized),
        PolicyKind::SingleEater => Arc::new(SingleEater::new()),
        PolicyKind::SpeciesTurns => Arc::new(SpeciesTurns::new(bowls)),
    }
}
