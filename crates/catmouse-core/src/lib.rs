//! Bowl arbitration and invariant enforcement for catmouse
//!
//! This crate is the checker at the heart of catmouse, containing:
//! - The bowl state store and the arbitration mutex guarding it
//! - The eating protocol (occupy -> eat -> vacate)
//! - Wait-time statistics under their own lock
//! - The actor loop (sleep -> before hook -> eat -> after hook -> record)
//! - The orchestrator that spawns actors, waits on the completion barrier
//!   and produces the report
//!
//! Any breach of bowl exclusivity or species exclusivity surfaces as an
//! [`InvariantViolation`]. Violations are never retried or masked: the run
//! stops and the caller is expected to terminate the process.

mod actor;
mod arbiter;
mod barrier;
mod error;
mod orchestrator;
mod protocol;
mod report;
mod stats;
mod store;

pub use actor::*;
pub use arbiter::*;
pub use barrier::*;
pub use error::*;
pub use orchestrator::*;
pub use protocol::*;
pub use report::*;
pub use stats::*;
pub use store::*;
