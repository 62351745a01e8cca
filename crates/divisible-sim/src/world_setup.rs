//! Wave setup: generate a wave, lay it out, and populate the registry.

use rand_chacha::ChaCha8Rng;

use divisible_core::events::GameEvent;
use divisible_rules::layout::layout;
use divisible_rules::waves::generate;

use crate::feedback::Feedback;
use crate::registry::MonsterRegistry;

/// Populate `registry` with wave `wave`. Returns the number of monsters spawned.
pub fn spawn_wave(
    registry: &mut MonsterRegistry,
    rng: &mut ChaCha8Rng,
    wave: u32,
    feedback: &mut Feedback,
) -> usize {
    let values = generate(wave, rng);
    let placed = layout(&values);
    for &(value, position) in &placed {
        let id = registry.spawn(value, position);
        feedback.emit(GameEvent::MonsterSpawned {
            id,
            value,
            position,
        });
    }
    placed.len()
}
