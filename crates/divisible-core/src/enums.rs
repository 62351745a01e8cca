//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level lifecycle state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    /// A wave is live and throws are accepted.
    Playing,
    /// Registry emptied; the next wave starts after a fixed delay.
    WaveClearPending,
    GameOver,
}

/// Formation movement state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormationState {
    /// No monsters to move.
    #[default]
    Idle,
    Advancing,
}

/// Horizontal sweep direction of the formation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepDirection {
    #[default]
    Right,
    Left,
}

impl SweepDirection {
    /// +1.0 for rightward, -1.0 for leftward.
    pub fn sign(self) -> f64 {
        match self {
            SweepDirection::Right => 1.0,
            SweepDirection::Left => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SweepDirection::Right => SweepDirection::Left,
            SweepDirection::Left => SweepDirection::Right,
        }
    }
}

/// Result of a projectile striking a monster, keyed on the quotient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitOutcome {
    /// Quotient 1: the monster disappears.
    Vanish,
    /// Quotient 2..=9: fragments are pocketed as balls of the quotient's value.
    Pocketed,
    /// Quotient 10..=100: the monster splits into ball-value copies of the quotient.
    Split,
    /// Quotient above 100: one copy of the quotient survives, the rest escape.
    Escape,
}

/// Purely visual effects the presentation layer may animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CosmeticKind {
    Explode,
    Vanish,
    Fragment,
    Escape,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// A monster crossed the depth threshold.
    Breach,
    /// The per-wave turn budget ran out with monsters remaining.
    OutOfTurns,
}

/// Why a throw request was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrowRejection {
    NotPlaying,
    ProjectileActive,
    NoBalls,
}
