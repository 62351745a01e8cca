//! Projectile flight curves.

use std::f64::consts::PI;

use glam::DVec2;

use divisible_core::constants::*;
use divisible_core::types::Position;

/// Where every throw starts.
pub fn entry_point() -> Position {
    Position::new(PROJECTILE_ENTRY_X, PROJECTILE_ENTRY_Y)
}

/// Position along a leg from `from` to `to` at `progress` in 0..=1.
///
/// The straight path is bent by a half-sine offset perpendicular to the leg.
/// Even legs bow to one side, odd legs to the other.
pub fn leg_position(from: Position, to: Position, progress: f64, leg_index: usize) -> Position {
    let progress = progress.clamp(0.0, 1.0);
    let start = from.to_vec();
    let end = to.to_vec();
    let base = start.lerp(end, progress);

    let normal = (end - start).try_normalize().map_or(DVec2::Y, |dir| dir.perp());
    let side = if leg_index % 2 == 0 { 1.0 } else { -1.0 };
    let bow = (progress * PI).sin() * ARC_AMPLITUDE * side;

    Position::from_vec(base + normal * bow)
}

/// Position of a projectile on the miss path after `ticks` ticks.
pub fn miss_position(ticks: u32) -> Position {
    Position::new(
        PROJECTILE_ENTRY_X + MISS_STEP * f64::from(ticks),
        PROJECTILE_ENTRY_Y,
    )
}

/// Whether the miss path has left the field.
pub fn miss_exited(position: Position) -> bool {
    position.x >= MISS_EXIT_X
}
