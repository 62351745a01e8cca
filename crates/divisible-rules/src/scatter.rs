//! Randomized placement of split monsters and pocketed fragments.

use std::f64::consts::TAU;

use rand::Rng;

use divisible_core::constants::*;
use divisible_core::types::Position;

/// Inventory slot a pocketed fragment of `quotient` flies to.
pub fn pocket_slot(quotient: u32) -> Position {
    let slot = quotient.saturating_sub(POCKET_QUOTIENT_MIN);
    Position::new(
        POCKET_SLOT_ORIGIN_X + f64::from(slot) * POCKET_SLOT_SPACING,
        POCKET_SLOT_Y,
    )
}

/// Scatter midpoints for `count` fragments bursting out of `origin`.
pub fn fragment_waypoints<R: Rng + ?Sized>(origin: Position, count: u32, rng: &mut R) -> Vec<Position> {
    (0..count)
        .map(|i| {
            let angle = TAU * f64::from(i) / f64::from(count) + rng.gen::<f64>() * FRAGMENT_ANGLE_JITTER;
            let distance = FRAGMENT_SCATTER_MIN + rng.gen::<f64>() * FRAGMENT_SCATTER_JITTER;
            Position::new(
                origin.x + angle.cos() * distance,
                origin.y + angle.sin() * distance,
            )
        })
        .collect()
}

/// Positions for `count` split monsters ringed around `origin`.
///
/// Each candidate is retried a bounded number of times if it lands on top
/// of an already placed sibling; after that the crowded spot is accepted.
pub fn split_positions<R: Rng + ?Sized>(origin: Position, count: u32, rng: &mut R) -> Vec<Position> {
    let mut placed: Vec<Position> = Vec::with_capacity(count as usize);
    for i in 0..count {
        let base_angle = TAU * f64::from(i) / f64::from(count);
        let mut candidate = origin;
        for _ in 0..SPLIT_PLACEMENT_ATTEMPTS {
            let angle = base_angle + rng.gen::<f64>() * SPLIT_ANGLE_JITTER;
            let distance = SPLIT_RADIUS_MIN + rng.gen::<f64>() * SPLIT_RADIUS_JITTER;
            candidate = Position::new(
                (origin.x + angle.cos() * distance).clamp(SPLIT_MIN_X, SPLIT_MAX_X),
                origin.y + angle.sin() * distance,
            );
            let crowded = placed
                .iter()
                .any(|other| other.distance_to(&candidate) < SPLIT_MIN_SEPARATION);
            if !crowded {
                break;
            }
        }
        placed.push(candidate);
    }
    placed
}
