//! Projectile data model for the single in-flight thrown ball.
//!
//! Stored as an `Option` on `SimulationEngine`, NOT as an ECS entity.
//! The target queue holds monster ids; positions are re-read from the
//! registry on every tick of every leg.

use std::collections::HashSet;

use divisible_core::components::MonsterId;
use divisible_core::state::ProjectileView;
use divisible_core::types::Position;
use divisible_rules::arc::entry_point;

/// What the projectile is doing right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flight {
    /// No divisible target: straight flight off the far edge.
    Miss { ticks: u32 },
    /// Travelling toward `targets[cursor]`, starting from `from`.
    Leg { from: Position, step: u32 },
    /// Between legs, waiting for the next-leg task.
    Settling,
    /// Queue exhausted, waiting for the discard task.
    Lingering,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    /// Serial of the throw that created this projectile.
    pub throw: u32,
    pub value: u32,
    pub position: Position,
    pub targets: Vec<MonsterId>,
    pub cursor: usize,
    /// Targets already resolved by this projectile.
    pub resolved: HashSet<MonsterId>,
    pub flight: Flight,
}

impl Projectile {
    /// Create a projectile at the entry point. With targets it starts its
    /// first leg immediately, otherwise it takes the miss path.
    pub fn launch(throw: u32, value: u32, targets: Vec<MonsterId>) -> Self {
        let position = entry_point();
        let flight = if targets.is_empty() {
            Flight::Miss { ticks: 0 }
        } else {
            Flight::Leg {
                from: position,
                step: 0,
            }
        };
        Self {
            throw,
            value,
            position,
            targets,
            cursor: 0,
            resolved: HashSet::new(),
            flight,
        }
    }

    pub fn is_miss(&self) -> bool {
        matches!(self.flight, Flight::Miss { .. })
    }

    pub fn current_target(&self) -> Option<MonsterId> {
        self.targets.get(self.cursor).copied()
    }

    /// Move past the current target and wait for the next-leg task.
    pub fn finish_leg(&mut self) {
        self.cursor += 1;
        self.flight = Flight::Settling;
    }

    /// Begin the leg toward the next queued target from the current position.
    /// Returns false (and starts lingering) when the queue is exhausted.
    pub fn begin_next_leg(&mut self) -> bool {
        if self.cursor >= self.targets.len() {
            self.flight = Flight::Lingering;
            return false;
        }
        self.flight = Flight::Leg {
            from: self.position,
            step: 0,
        };
        true
    }

    pub fn view(&self) -> ProjectileView {
        ProjectileView {
            value: self.value,
            position: self.position,
            remaining_targets: self.targets.get(self.cursor..).unwrap_or_default().to_vec(),
        }
    }
}
