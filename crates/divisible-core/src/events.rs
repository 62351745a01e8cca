//! Events emitted by the simulation for audio and presentation feedback.
//!
//! Events are one-way notifications. Nothing in the simulation waits on
//! a consumer, so a missing audio or render layer never stalls the game.

use serde::{Deserialize, Serialize};

use crate::components::MonsterId;
use crate::enums::*;
use crate::types::Position;

/// Audio cues for the frontend sound system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Formation stepped; pitch index cycles through the invader ladder.
    InvaderTick { pitch_index: u32 },
    Hit,
    Catch,
    Vanish,
    Throw,
    GameOver,
}

/// Presentation events describing every visible state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    PhaseChanged {
        phase: GamePhase,
    },
    WaveStarted {
        wave: u32,
        monster_count: usize,
    },
    WaveCleared {
        wave: u32,
    },
    MonsterSpawned {
        id: MonsterId,
        value: u32,
        position: Position,
    },
    /// Whole-formation displacement applied this tick.
    MonstersMoved {
        dx: f64,
        dy: f64,
    },
    MonsterRemoved {
        id: MonsterId,
    },
    ProjectileSpawned {
        value: u32,
        position: Position,
    },
    ProjectileMoved {
        position: Position,
    },
    ProjectileDestroyed,
    HitOccurred {
        monster: MonsterId,
        monster_value: u32,
        ball: u32,
        quotient: u32,
        outcome: HitOutcome,
    },
    /// Visual-only effect. `destination` and `via` are set for fragments.
    Cosmetic {
        kind: CosmeticKind,
        position: Position,
        value: u32,
        via: Option<Position>,
        destination: Option<Position>,
        delay_ticks: u64,
    },
    ScoreChanged {
        score: u64,
    },
    InventoryChanged {
        value: u32,
        count: u32,
    },
    ThrowRejected {
        value: u32,
        reason: ThrowRejection,
    },
    GameOver {
        reason: GameOverReason,
    },
}
