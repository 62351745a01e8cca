//! Hit-outcome policy: the quotient table.
//!
//! | quotient   | outcome  |
//! |------------|----------|
//! | 1          | Vanish   |
//! | 2..=9      | Pocketed |
//! | 10..=100   | Split    |
//! | > 100      | Escape   |
//!
//! Every branch awards the struck monster's value as score.

use divisible_core::constants::*;
use divisible_core::enums::HitOutcome;

/// Classify a quotient. Quotient 0 cannot occur for a legal hit and is
/// treated like 1.
pub fn classify(quotient: u32) -> HitOutcome {
    match quotient {
        0 | 1 => HitOutcome::Vanish,
        POCKET_QUOTIENT_MIN..=POCKET_QUOTIENT_MAX => HitOutcome::Pocketed,
        q if q <= SPLIT_QUOTIENT_MAX => HitOutcome::Split,
        _ => HitOutcome::Escape,
    }
}

/// Full effect of a ball of value `ball` striking a monster of value `monster_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub quotient: u32,
    pub outcome: HitOutcome,
    /// Score awarded (immediately, or on pocket arrival).
    pub score: u64,
    /// Balls credited to inventory\[quotient\] once fragments land.
    pub pocketed: u32,
    /// New monsters spawned, all carrying `quotient`.
    pub spawned: u32,
    /// Surplus fragments discarded by the escape branch.
    pub escaped: u32,
    /// Whether the hit counts toward the defeated counter.
    pub defeats: bool,
}

/// Resolve a hit. Returns `None` when `ball` does not divide the value,
/// which the targeting rule never produces.
pub fn resolve(monster_value: u32, ball: u32) -> Option<Resolution> {
    if ball == 0 || monster_value % ball != 0 {
        return None;
    }
    let quotient = monster_value / ball;
    let outcome = classify(quotient);
    let score = u64::from(monster_value);

    let resolution = match outcome {
        HitOutcome::Vanish => Resolution {
            quotient,
            outcome,
            score,
            pocketed: 0,
            spawned: 0,
            escaped: 0,
            defeats: true,
        },
        HitOutcome::Pocketed => Resolution {
            quotient,
            outcome,
            score,
            pocketed: ball,
            spawned: 0,
            escaped: 0,
            defeats: true,
        },
        HitOutcome::Split => Resolution {
            quotient,
            outcome,
            score,
            pocketed: 0,
            spawned: ball,
            escaped: 0,
            defeats: false,
        },
        HitOutcome::Escape => Resolution {
            quotient,
            outcome,
            score,
            pocketed: 0,
            spawned: 1,
            escaped: ball.saturating_sub(1),
            defeats: false,
        },
    };
    Some(resolution)
}
