//! Core types and definitions for the Divisible wave/combat engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, and constants.
//! It has no dependency on the simulation runtime or any host.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
