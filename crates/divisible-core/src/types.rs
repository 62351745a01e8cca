//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position on the play field, in percent of width (x) and depth (y).
/// y grows downward: larger y is closer to the defended edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self::from_vec(v)
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
