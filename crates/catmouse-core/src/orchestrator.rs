//! Simulation orchestrator

use catmouse_config::SimulationConfig;
use catmouse_policy_api::SyncPolicy;
use catmouse_util::{ActorId, MonotonicInstant, RunId, Species};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{error, info, info_span, Instrument};

use crate::{
    actor_rng, run_actor, total_eating_time, utilization_percent, ActorPlan, InvariantViolation,
    RunError, SharedState, SimulationReport, SpeciesReport,
};

/// One configured run against one synchronization policy
pub struct Simulation {
    config: SimulationConfig,
    policy: Arc<dyn SyncPolicy>,
    run_id: RunId,
}

impl Simulation {
    pub fn new(config: SimulationConfig, policy: Arc<dyn SyncPolicy>) -> Self {
        Self {
            config,
            policy,
            run_id: RunId::new(),
        }
    }

    /// Spawn every actor, wait for all of them, then report.
    ///
    /// Returns as soon as any actor hits an invariant violation; the other
    /// actors are aborted. Must be called inside a tokio runtime.
    pub async fn run(self) -> Result<SimulationReport, RunError> {
        self.config.validate()?;

        let span = info_span!("run", run_id = %self.run_id, policy = self.policy.name());
        self.run_inner().instrument(span).await
    }

    async fn run_inner(self) -> Result<SimulationReport, RunError> {
        let config = &self.config;
        info!(
            bowls = config.bowls,
            cats = config.cats,
            mice = config.mice,
            loops = config.loops,
            cat_eat = config.timing.cat_eat,
            cat_sleep = config.timing.cat_sleep,
            mouse_eat = config.timing.mouse_eat,
            mouse_sleep = config.timing.mouse_sleep,
            "Starting simulation"
        );

        let shared = Arc::new(SharedState::new(config.bowls));
        let (fault_tx, mut faults) = mpsc::unbounded_channel::<(ActorId, InvariantViolation)>();
        let mut tasks = JoinSet::new();

        let started_at = catmouse_util::now();
        let started = MonotonicInstant::now();

        for id in spawn_order(config.cats, config.mice) {
            let plan = ActorPlan::from_config(id, config);
            let rng = actor_rng(config.seed, id);
            let shared = shared.clone();
            let policy = self.policy.clone();
            let fault_tx = fault_tx.clone();

            tasks.spawn(
                async move {
                    if let Err(violation) = run_actor(plan, shared, policy, rng).await {
                        error!(actor = %id, %violation, "Invariant violated");
                        let _ = fault_tx.send((id, violation));
                    }
                }
                .in_current_span(),
            );
        }
        drop(fault_tx);

        let expected = config.actor_count();
        info!(actors = expected, "Actors spawned");

        let completion = shared.barrier.wait_for(expected);
        tokio::pin!(completion);

        loop {
            tokio::select! {
                biased;

                Some((actor, violation)) = faults.recv() => {
                    tasks.abort_all();
                    return Err(RunError::invariant(Some(actor), violation));
                }

                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = joined {
                        tasks.abort_all();
                        return Err(RunError::ActorFailed(e.to_string()));
                    }
                }

                () = &mut completion => break,
            }
        }

        let span = started.elapsed();

        while let Some(joined) = tasks.join_next().await {
            joined.map_err(|e| RunError::ActorFailed(e.to_string()))?;
        }

        let store = shared
            .arbiter
            .audit_idle()
            .map_err(|violation| RunError::invariant(None, violation))?;
        let cat_totals = shared
            .stats
            .snapshot(Species::Cat)
            .map_err(|violation| RunError::invariant(None, violation))?;
        let mouse_totals = shared
            .stats
            .snapshot(Species::Mouse)
            .map_err(|violation| RunError::invariant(None, violation))?;

        let utilization = utilization_percent(total_eating_time(config), span, config.bowls);

        info!(
            span_ms = u64::try_from(span.as_millis()).unwrap_or(u64::MAX),
            utilization_percent = ?utilization,
            "Simulation complete"
        );

        Ok(SimulationReport {
            run_id: self.run_id.clone(),
            started_at,
            policy: self.policy.name().to_string(),
            bowls: config.bowls,
            loops: config.loops,
            span_ms: u64::try_from(span.as_millis()).unwrap_or(u64::MAX),
            utilization_percent: utilization,
            cats: SpeciesReport::new(
                Species::Cat,
                config.cats,
                &cat_totals,
                store.peak(Species::Cat),
            ),
            mice: SpeciesReport::new(
                Species::Mouse,
                config.mice,
                &mouse_totals,
                store.peak(Species::Mouse),
            ),
        })
    }
}

/// Cats and mice interleaved by index, surplus of either species last
pub fn spawn_order(cats: usize, mice: usize) -> Vec<ActorId> {
    let mut order = Vec::with_capacity(cats + mice);
    for index in 0..cats.max(mice) {
        if index < cats {
            order.push(ActorId::cat(index));
        }
        if index < mice {
            order.push(ActorId::mouse(index));
        }
    }
    order
}
