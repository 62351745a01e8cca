//! Simulation engine for DIVISIBLE.
//!
//! Owns the hecs monster registry, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the host.

pub mod engine;
pub mod feedback;
pub mod inventory;
pub mod projectile;
pub mod registry;
pub mod scheduler;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use divisible_core as core;
pub use engine::{SimConfig, SimulationEngine};
