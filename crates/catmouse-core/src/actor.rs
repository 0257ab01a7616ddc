//! Actor simulation loop

use catmouse_config::SimulationConfig;
use catmouse_policy_api::SyncPolicy;
use catmouse_util::{ActorId, BowlId, MonotonicInstant};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

use crate::{eat, Arbiter, CompletionBarrier, InvariantViolation, WaitStats};

/// State shared by every actor of a run.
///
/// Created before the first actor is spawned and dropped only after the
/// last one has signaled completion.
#[derive(Debug)]
pub struct SharedState {
    pub arbiter: Arbiter,
    pub stats: WaitStats,
    pub barrier: CompletionBarrier,
}

impl SharedState {
    pub fn new(bowls: usize) -> Self {
        Self {
            arbiter: Arbiter::new(bowls),
            stats: WaitStats::new(),
            barrier: CompletionBarrier::new(),
        }
    }
}

/// Fixed parameters of one actor's loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorPlan {
    pub id: ActorId,
    pub bowls: usize,
    pub loops: u32,
    pub eat: Duration,
    pub sleep: Duration,
}

impl ActorPlan {
    pub fn from_config(id: ActorId, config: &SimulationConfig) -> Self {
        Self {
            id,
            bowls: config.bowls,
            loops: config.loops,
            eat: config.eat_duration(id.species),
            sleep: config.sleep_duration(id.species),
        }
    }
}

/// Bowl-choice generator for one actor.
///
/// With a seed the sequence depends only on the seed and the actor's
/// identity, not on scheduling.
pub fn actor_rng(seed: Option<u64>, id: ActorId) -> StdRng {
    match seed {
        Some(seed) => {
            let stream = ((id.species.index() as u64) << 32) | id.index as u64;
            StdRng::seed_from_u64(seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        }
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Run `plan.loops` iterations of sleep, wait for admission, eat, release.
///
/// Signals the completion barrier once after the last iteration. On an
/// invariant violation the actor stops at once without signaling.
pub async fn run_actor(
    plan: ActorPlan,
    shared: Arc<SharedState>,
    policy: Arc<dyn SyncPolicy>,
    mut rng: StdRng,
) -> Result<(), InvariantViolation> {
    let species = plan.id.species;

    for iteration in 0..plan.loops {
        tokio::time::sleep(plan.sleep).await;

        let bowl = BowlId::from_index(rng.random_range(0..plan.bowls));

        let before = MonotonicInstant::now();
        policy.before_eating(species, bowl).await;
        let waited = before.elapsed();

        trace!(
            actor = %plan.id,
            iteration,
            %bowl,
            waited_us = u64::try_from(waited.as_micros()).unwrap_or(u64::MAX),
            "Admitted to bowl"
        );

        eat(&shared.arbiter, species, bowl, plan.eat).await?;

        policy.after_eating(species, bowl).await;

        shared.stats.record(species, waited)?;
    }

    shared.barrier.signal();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catmouse_policy_api::{Hook, PassThrough, RecordingPolicy};
    use catmouse_util::Species;

    #[test]
    fn seeded_rngs_are_reproducible_and_distinct() {
        let a1: Vec<usize> = {
            let mut rng = actor_rng(Some(42), ActorId::cat(0));
            (0..16).map(|_| rng.random_range(0..100)).collect()
        };
        let a2: Vec<usize> = {
            let mut rng = actor_rng(Some(42), ActorId::cat(0));
            (0..16).map(|_| rng.random_range(0..100)).collect()
        };
        let b: Vec<usize> = {
            let mut rng = actor_rng(Some(42), ActorId::mouse(0));
            (0..16).map(|_| rng.random_range(0..100)).collect()
        };

        assert_eq!(a1, a2);
        assert_ne!(a1, b);
    }

    #[tokio::test(start_paused = true)]
    async fn actor_calls_hooks_once_per_iteration_and_signals() {
        let shared = Arc::new(SharedState::new(3));
        let policy = Arc::new(RecordingPolicy::new(PassThrough));
        let plan = ActorPlan {
            id: ActorId::mouse(0),
            bowls: 3,
            loops: 4,
            eat: Duration::from_secs(1),
            sleep: Duration::from_secs(2),
        };

        run_actor(plan, shared.clone(), policy.clone(), actor_rng(Some(1), plan.id))
            .await
            .unwrap();

        assert_eq!(policy.count(Hook::Before, Species::Mouse), 4);
        assert_eq!(policy.count(Hook::After, Species::Mouse), 4);
        let calls = policy.calls();
        for pair in calls.chunks(2) {
            assert_eq!(pair[0].hook, Hook::Before);
            assert_eq!(pair[1].hook, Hook::After);
            assert_eq!(pair[0].bowl, pair[1].bowl);
        }

        assert_eq!(shared.stats.snapshot(Species::Mouse).unwrap().samples(), 4);
        shared.barrier.wait_for(1).await;
        assert!(shared.arbiter.audit_idle().is_ok());
    }
}
