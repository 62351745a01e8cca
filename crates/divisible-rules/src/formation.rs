//! Formation movement state machine.
//!
//! One call to [`step`] is one formation tick: shift horizontally, count the
//! tick, and every `TICKS_PER_REVERSAL` ticks reverse and (outside the boss
//! wave) descend. Applying the displacement to monsters is the caller's job.

use divisible_core::constants::*;
use divisible_core::enums::SweepDirection;

/// Formation state carried between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FormationContext {
    pub direction: SweepDirection,
    pub tick_count: u32,
    /// Boss waves oscillate without descending.
    pub suppress_descent: bool,
}

/// Output of one formation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationUpdate {
    pub dx: f64,
    pub dy: f64,
    pub direction: SweepDirection,
    pub tick_count: u32,
    pub reversed: bool,
    /// Index into the invader pitch ladder for this tick's cue.
    pub pitch_index: u32,
}

/// Evaluate one formation tick.
pub fn step(ctx: &FormationContext) -> FormationUpdate {
    let dx = ctx.direction.sign() * FORMATION_STEP;
    let pitch_index = ctx.tick_count % TICKS_PER_REVERSAL;
    let tick_count = ctx.tick_count.wrapping_add(1);

    let reversed = tick_count % TICKS_PER_REVERSAL == 0;
    let (direction, dy) = if reversed {
        let dy = if ctx.suppress_descent { 0.0 } else { DESCENT_STEP };
        (ctx.direction.reversed(), dy)
    } else {
        (ctx.direction, 0.0)
    };

    FormationUpdate {
        dx,
        dy,
        direction,
        tick_count,
        reversed,
        pitch_index,
    }
}

/// True if any depth is past the loss threshold.
pub fn breached(depths: impl IntoIterator<Item = f64>) -> bool {
    depths.into_iter().any(|y| y > DEPTH_THRESHOLD)
}
