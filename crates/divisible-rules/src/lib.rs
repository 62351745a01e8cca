//! Game rules for Divisible.
//!
//! Pure functions for wave generation, formation layout and movement,
//! hit-outcome classification, and projectile/fragment geometry.
//! No ECS dependency: everything here operates on plain data, and the
//! only side effect is drawing from a caller-supplied RNG.

pub mod arc;
pub mod formation;
pub mod layout;
pub mod outcome;
pub mod scatter;
pub mod waves;

pub use divisible_core as core;

#[cfg(test)]
mod tests;
