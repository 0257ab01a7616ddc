//! Recording policy wrapper for testing

use async_trait::async_trait;
use catmouse_util::{BowlId, Species};
use std::sync::{Arc, Mutex};

use crate::SyncPolicy;

/// Which hook was called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    Before,
    After,
}

/// One recorded hook invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookCall {
    pub hook: Hook,
    pub species: Species,
    pub bowl: BowlId,
}

/// Wraps a policy and records every hook call in order
pub struct RecordingPolicy<P> {
    inner: P,
    calls: Arc<Mutex<Vec<HookCall>>>,
}

impl<P: SyncPolicy> RecordingPolicy<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All calls so far, in the order they returned to the caller
    pub fn calls(&self) -> Vec<HookCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, hook: Hook, species: Species) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.hook == hook && c.species == species)
            .count()
    }

    fn record(&self, hook: Hook, species: Species, bowl: BowlId) {
        self.calls.lock().unwrap().push(HookCall {
            hook,
            species,
            bowl,
        });
    }
}

#[async_trait]
impl<P: SyncPolicy> SyncPolicy for RecordingPolicy<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn before_eating(&self, species: Species, bowl: BowlId) {
        self.inner.before_eating(species, bowl).await;
        self.record(Hook::Before, species, bowl);
    }

    async fn after_eating(&self, species: Species, bowl: BowlId) {
        self.record(Hook::After, species, bowl);
        self.inner.after_eating(species, bowl).await;
    }
}

/// A policy whose hooks return immediately
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

#[async_trait]
impl SyncPolicy for PassThrough {
    fn name(&self) -> &str {
        "pass-through"
    }

    async fn before_eating(&self, _species: Species, _bowl: BowlId) {}

    async fn after_eating(&self, _species: Species, _bowl: BowlId) {}
}
