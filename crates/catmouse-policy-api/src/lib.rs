//! Synchronization policy interface for catmouse
//!
//! The core calls a policy around every eating attempt but never implements
//! one. This crate holds that seam and nothing else: the trait, the names
//! of the available policies, and a recording wrapper for tests.

mod kind;
mod mock;
mod traits;

pub use kind::*;
pub use mock::*;
pub use traits::*;
