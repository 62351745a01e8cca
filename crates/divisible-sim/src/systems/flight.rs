//! Projectile flight: per-tick motion along the miss path or the current leg.
//!
//! Leg targets are looked up by id every tick, so a formation step that
//! moves the target mid-leg bends the path toward its new position.

use divisible_core::components::MonsterId;
use divisible_core::constants::LEG_TICKS;
use divisible_core::events::GameEvent;
use divisible_rules::arc::{leg_position, miss_exited, miss_position};

use crate::feedback::Feedback;
use crate::projectile::{Flight, Projectile};
use crate::registry::MonsterRegistry;

/// What happened to the projectile this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightEvent {
    /// Moved, or idle between legs.
    InFlight,
    /// Completed the leg to this target.
    Arrived(MonsterId),
    /// The current target no longer exists.
    TargetLost(MonsterId),
    /// The miss path left the field.
    Exited,
}

/// Advance the projectile by one tick.
pub fn run(
    projectile: &mut Projectile,
    registry: &MonsterRegistry,
    feedback: &mut Feedback,
) -> FlightEvent {
    match projectile.flight {
        Flight::Miss { ticks } => {
            let ticks = ticks + 1;
            projectile.flight = Flight::Miss { ticks };
            projectile.position = miss_position(ticks);
            feedback.emit(GameEvent::ProjectileMoved {
                position: projectile.position,
            });
            if miss_exited(projectile.position) {
                FlightEvent::Exited
            } else {
                FlightEvent::InFlight
            }
        }
        Flight::Leg { from, step } => {
            let Some(target) = projectile.current_target() else {
                return FlightEvent::InFlight;
            };
            let Some(to) = registry.position_of(target) else {
                return FlightEvent::TargetLost(target);
            };
            let step = step + 1;
            projectile.flight = Flight::Leg { from, step };
            let progress = f64::from(step) / f64::from(LEG_TICKS);
            projectile.position = leg_position(from, to, progress, projectile.cursor);
            feedback.emit(GameEvent::ProjectileMoved {
                position: projectile.position,
            });
            if step >= LEG_TICKS {
                FlightEvent::Arrived(target)
            } else {
                FlightEvent::InFlight
            }
        }
        Flight::Settling | Flight::Lingering => FlightEvent::InFlight,
    }
}
