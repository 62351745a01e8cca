//! Game state snapshot: the complete visible state sent to the host each tick.

use serde::{Deserialize, Serialize};

use crate::components::MonsterId;
use crate::enums::*;
use crate::events::{AudioEvent, GameEvent};
use crate::types::{Position, SimTime};

/// Complete game state broadcast to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: WaveView,
    pub monsters: Vec<MonsterView>,
    pub projectile: Option<ProjectileView>,
    /// (ball value, count) for every value 2..=9, zero counts included.
    pub inventory: Vec<(u32, u32)>,
    pub score: ScoreView,
    pub events: Vec<GameEvent>,
    pub audio_events: Vec<AudioEvent>,
}

/// A live monster on the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterView {
    pub id: MonsterId,
    pub value: u32,
    pub position: Position,
}

/// The projectile currently in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub value: u32,
    pub position: Position,
    /// Targets still to be visited, in visiting order.
    pub remaining_targets: Vec<MonsterId>,
}

/// Formation and wave status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub index: u32,
    pub formation: FormationState,
    pub direction: SweepDirection,
    pub tick_count: u32,
    pub is_boss: bool,
    /// Throws left this wave, when the turn budget is enabled.
    pub turns_left: Option<u32>,
}

/// Running score for display (and the game-over summary).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u64,
    pub defeated: u32,
    pub misses: u32,
    pub throws: u32,
    pub game_over_reason: Option<GameOverReason>,
}
