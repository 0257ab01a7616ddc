//! Completion barrier

use tokio::sync::Semaphore;
use tracing::trace;

/// Counts finished actors.
///
/// Each actor signals exactly once when done; the orchestrator waits until
/// the expected number of signals has arrived.
#[derive(Debug)]
pub struct CompletionBarrier {
    done: Semaphore,
}

impl CompletionBarrier {
    pub fn new() -> Self {
        Self {
            done: Semaphore::new(0),
        }
    }

    pub fn signal(&self) {
        self.done.add_permits(1);
    }

    /// Wait for `expected` signals, consuming them
    pub async fn wait_for(&self, expected: usize) {
        for arrived in 0..expected {
            match self.done.acquire().await {
                Ok(permit) => permit.forget(),
                // The semaphore is never closed.
                Err(_) => return,
            }
            trace!(arrived = arrived + 1, expected, "Actor finished");
        }
    }
}

impl Default for CompletionBarrier {
    fn default() -> Self {
        Self::new()
    }
}
