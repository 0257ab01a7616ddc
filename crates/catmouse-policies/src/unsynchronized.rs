//! Policy without any admission control

use async_trait::async_trait;
use catmouse_policy_api::SyncPolicy;
use catmouse_util::{BowlId, Species};

/// Lets every actor straight through.
///
/// With more than one actor this eventually puts two actors in one bowl or
/// mixes species, which the core reports as an invariant violation.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unsynchronized;

#[async_trait]
impl SyncPolicy for Unsynchronized {
    fn name(&self) -> &str {
        "unsynchronized"
    }

    async fn before_eating(&self, _species: Species, _bowl: BowlId) {}

    async fn after_eating(&self, _species: Species, _bowl: BowlId) {}
}
