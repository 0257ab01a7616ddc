//! Policy trait

use async_trait::async_trait;
use catmouse_util::{BowlId, Species};

/// Admission control around an eating attempt.
///
/// For each attempt the core calls [`SyncPolicy::before_eating`] strictly
/// before it occupies the bowl and [`SyncPolicy::after_eating`] strictly
/// after it vacates it. A hook may wait for as long as the policy needs;
/// the core holds none of its own locks during either call.
///
/// A correct policy never lets two actors into the same bowl, and never
/// lets a cat in while any mouse is between the two hooks (or the reverse).
/// The core checks both and treats a breach as fatal.
#[async_trait]
pub trait SyncPolicy: Send + Sync {
    /// Name used in logs and reports
    fn name(&self) -> &str;

    /// Wait until `species` may eat at `bowl`
    async fn before_eating(&self, species: Species, bowl: BowlId);

    /// Release whatever `before_eating` acquired for this attempt
    async fn after_eating(&self, species: Species, bowl: BowlId);
}
