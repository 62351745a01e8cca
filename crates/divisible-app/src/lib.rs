//! DIVISIBLE terminal host.
//!
//! This crate wires the simulation to a line-oriented terminal front end:
//! player commands arrive on stdin, snapshots leave as JSON lines.

pub mod game_loop;
pub mod input;
pub mod state;

pub use divisible_core as core;
