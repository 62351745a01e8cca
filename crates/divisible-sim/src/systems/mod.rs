//! Systems that operate on the simulation state each tick.
//!
//! Systems are free functions over borrowed engine state. They do not own
//! state beyond small trackers handed in by the engine.

pub mod flight;
pub mod formation;
pub mod hit_resolution;
pub mod snapshot;
