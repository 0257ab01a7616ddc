//! One-at-a-time policy

use async_trait::async_trait;
use catmouse_policy_api::SyncPolicy;
use catmouse_util::{BowlId, Species};
use tokio::sync::Semaphore;

/// Admits a single actor between `before_eating` and `after_eating`.
#[derive(Debug)]
pub struct SingleEater {
    permit: Semaphore,
}

impl SingleEater {
    pub fn new() -> Self {
        Self {
            permit: Semaphore::new(1),
        }
    }
}

impl Default for SingleEater {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SyncPolicy for SingleEater {
    fn name(&self) -> &str {
        "single-eater"
    }

    async fn before_eating(&self, _species: Species, _bowl: BowlId) {
        // The permit outlives this call; after_eating hands it back.
        if let Ok(permit) = self.permit.acquire().await {
            permit.forget();
        }
    }

    async fn after_eating(&self, _species: Species, _bowl: BowlId) {
        self.permit.add_permits(1);
    }
}
