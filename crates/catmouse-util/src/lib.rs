//! Shared utilities for catmouse
//!
//! This crate provides:
//! - ID types (Species, BowlId, ActorId, RunId)
//! - Time utilities (monotonic time, time units, duration formatting)

mod ids;
mod time;

pub use ids::*;
pub use time::*;
