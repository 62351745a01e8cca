//! Formation movement: the periodic tick source that sweeps, reverses and
//! lowers the whole registry.

use log::trace;

use divisible_core::constants::{ms_to_ticks, FORMATION_PERIOD_MS};
use divisible_core::enums::FormationState;
use divisible_core::events::{AudioEvent, GameEvent};
use divisible_core::state::WaveView;
use divisible_rules::formation::{breached, step, FormationContext};

use crate::feedback::Feedback;
use crate::registry::MonsterRegistry;

/// Formation state owned by the engine and reset at every wave start.
#[derive(Debug, Clone, Default)]
pub struct FormationTracker {
    pub state: FormationState,
    pub context: FormationContext,
    /// Engine ticks since the last formation tick.
    clock: u64,
    stopped: bool,
}

/// Result of one engine tick of formation movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationTick {
    /// No formation tick this engine tick.
    Waiting,
    Stepped,
    /// Stepped and a monster crossed the depth threshold.
    Breached,
}

impl FormationTracker {
    /// Fresh tracker for a wave; boss waves never descend.
    pub fn for_wave(is_boss: bool) -> Self {
        Self {
            context: FormationContext {
                suppress_descent: is_boss,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Stop the tick source for good (game over).
    pub fn stop(&mut self) {
        self.stopped = true;
        self.state = FormationState::Idle;
    }

    pub fn fill_view(&self, view: &mut WaveView) {
        view.formation = self.state;
        view.direction = self.context.direction;
        view.tick_count = self.context.tick_count;
        view.is_boss = self.context.suppress_descent;
    }
}

/// Advance the formation clock by one engine tick and step the formation
/// when the period elapses.
pub fn run(
    tracker: &mut FormationTracker,
    registry: &mut MonsterRegistry,
    feedback: &mut Feedback,
) -> FormationTick {
    if tracker.stopped {
        return FormationTick::Waiting;
    }
    if registry.is_empty() {
        tracker.state = FormationState::Idle;
        tracker.clock = 0;
        return FormationTick::Waiting;
    }

    tracker.state = FormationState::Advancing;
    tracker.clock += 1;
    if tracker.clock < ms_to_ticks(FORMATION_PERIOD_MS) {
        return FormationTick::Waiting;
    }
    tracker.clock = 0;

    let update = step(&tracker.context);
    registry.translate_all(update.dx, update.dy);
    tracker.context.direction = update.direction;
    tracker.context.tick_count = update.tick_count;

    feedback.emit(GameEvent::MonstersMoved {
        dx: update.dx,
        dy: update.dy,
    });
    feedback.cue(AudioEvent::InvaderTick {
        pitch_index: update.pitch_index,
    });
    trace!(
        "formation tick {} dx={} dy={} reversed={}",
        update.tick_count,
        update.dx,
        update.dy,
        update.reversed
    );

    if breached(registry.depths()) {
        FormationTick::Breached
    } else {
        FormationTick::Stepped
    }
}
