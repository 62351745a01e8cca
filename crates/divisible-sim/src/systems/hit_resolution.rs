//! Hit resolution: apply the quotient table to a struck monster.
//!
//! The monster is removed before branching so no later leg can target it.
//! A target that is already gone, or that the ball does not divide, is a
//! no-op: concurrent removal is an expected race, not a fault.

use log::debug;
use rand_chacha::ChaCha8Rng;

use divisible_core::components::MonsterId;
use divisible_core::constants::{ms_to_ticks, FRAGMENT_STAGGER_MS, FRAGMENT_TRAVEL_MS};
use divisible_core::enums::{CosmeticKind, HitOutcome};
use divisible_core::events::{AudioEvent, GameEvent};
use divisible_core::types::Position;
use divisible_rules::outcome::resolve;
use divisible_rules::scatter::{fragment_waypoints, pocket_slot, split_positions};

use crate::feedback::Feedback;
use crate::registry::MonsterRegistry;
use crate::scheduler::{Scheduler, Task};
use crate::session::ScoreState;

/// Mutable engine state a hit touches.
pub struct HitContext<'a> {
    pub registry: &'a mut MonsterRegistry,
    pub scheduler: &'a mut Scheduler,
    pub rng: &'a mut ChaCha8Rng,
    pub score: &'a mut ScoreState,
    pub feedback: &'a mut Feedback,
    pub now: u64,
}

/// Resolve a hit on `target` by a ball of value `ball`.
/// Returns the outcome, or `None` if nothing happened.
pub fn run(ctx: &mut HitContext<'_>, target: MonsterId, ball: u32) -> Option<HitOutcome> {
    let (monster, origin) = ctx.registry.get(target)?;
    let resolution = resolve(monster.value, ball)?;
    ctx.registry.remove(target)?;

    ctx.feedback.emit(GameEvent::MonsterRemoved { id: target });
    ctx.feedback.cue(AudioEvent::Hit);
    cosmetic(ctx.feedback, CosmeticKind::Explode, origin, monster.value);

    match resolution.outcome {
        HitOutcome::Vanish => {
            ctx.feedback.cue(AudioEvent::Vanish);
            cosmetic(ctx.feedback, CosmeticKind::Vanish, origin, monster.value);
            ctx.score.award(resolution.score, ctx.feedback);
            ctx.score.defeated += 1;
        }
        HitOutcome::Pocketed => {
            let destination = pocket_slot(resolution.quotient);
            let waypoints = fragment_waypoints(origin, resolution.pocketed, ctx.rng);
            for (i, via) in waypoints.into_iter().enumerate() {
                ctx.feedback.emit(GameEvent::Cosmetic {
                    kind: CosmeticKind::Fragment,
                    position: origin,
                    value: resolution.quotient,
                    via: Some(via),
                    destination: Some(destination),
                    delay_ticks: ms_to_ticks(FRAGMENT_STAGGER_MS * i as u64),
                });
            }
            // Score and the defeat land together with the fragments.
            ctx.scheduler.schedule(
                ctx.now,
                ms_to_ticks(FRAGMENT_TRAVEL_MS),
                Task::PocketArrival {
                    value: resolution.quotient,
                    count: resolution.pocketed,
                    score: resolution.score,
                },
            );
        }
        HitOutcome::Split => {
            for position in split_positions(origin, resolution.spawned, ctx.rng) {
                spawn(ctx, resolution.quotient, position);
            }
            ctx.score.award(resolution.score, ctx.feedback);
        }
        HitOutcome::Escape => {
            spawn(ctx, resolution.quotient, origin);
            for _ in 0..resolution.escaped {
                cosmetic(ctx.feedback, CosmeticKind::Escape, origin, resolution.quotient);
            }
            ctx.score.award(resolution.score, ctx.feedback);
        }
    }

    ctx.feedback.emit(GameEvent::HitOccurred {
        monster: target,
        monster_value: monster.value,
        ball,
        quotient: resolution.quotient,
        outcome: resolution.outcome,
    });
    debug!(
        "hit monster {} ({}) with {ball}: quotient {} -> {:?}",
        target.0, monster.value, resolution.quotient, resolution.outcome
    );
    Some(resolution.outcome)
}

fn spawn(ctx: &mut HitContext<'_>, value: u32, position: Position) {
    let id = ctx.registry.spawn(value, position);
    ctx.feedback.emit(GameEvent::MonsterSpawned {
        id,
        value,
        position,
    });
}

fn cosmetic(feedback: &mut Feedback, kind: CosmeticKind, position: Position, value: u32) {
    feedback.emit(GameEvent::Cosmetic {
        kind,
        position,
        value,
        via: None,
        destination: None,
        delay_ticks: 0,
    });
}
