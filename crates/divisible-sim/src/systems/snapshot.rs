//! Snapshot system: builds a complete GameStateSnapshot from engine state.
//!
//! This system is read-only and never modifies the registry.

use divisible_core::enums::GamePhase;
use divisible_core::events::{AudioEvent, GameEvent};
use divisible_core::state::*;
use divisible_core::types::SimTime;

use crate::inventory::Inventory;
use crate::projectile::Projectile;
use crate::registry::MonsterRegistry;
use crate::session::ScoreState;

/// Everything the snapshot reads, borrowed from the engine.
pub struct SnapshotInputs<'a> {
    pub registry: &'a MonsterRegistry,
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: WaveView,
    pub projectile: Option<&'a Projectile>,
    pub inventory: &'a Inventory,
    pub score: &'a ScoreState,
}

/// Build a complete GameStateSnapshot.
pub fn build_snapshot(
    inputs: SnapshotInputs<'_>,
    events: Vec<GameEvent>,
    audio_events: Vec<AudioEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: inputs.time,
        phase: inputs.phase,
        wave: inputs.wave,
        monsters: build_monsters(inputs.registry),
        projectile: inputs.projectile.map(Projectile::view),
        inventory: inputs.inventory.view(),
        score: inputs.score.view(),
        events,
        audio_events,
    }
}

fn build_monsters(registry: &MonsterRegistry) -> Vec<MonsterView> {
    registry
        .monsters()
        .into_iter()
        .map(|(monster, position)| MonsterView {
            id: monster.id,
            value: monster.value,
            position,
        })
        .collect()
}
