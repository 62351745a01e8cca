//! Outbound event buffers drained into each tick's snapshot.

use divisible_core::events::{AudioEvent, GameEvent};

#[derive(Debug, Default)]
pub struct Feedback {
    pub events: Vec<GameEvent>,
    pub audio_events: Vec<AudioEvent>,
}

impl Feedback {
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn cue(&mut self, audio: AudioEvent) {
        self.audio_events.push(audio);
    }

    /// Take everything emitted since the last call.
    pub fn take(&mut self) -> (Vec<GameEvent>, Vec<AudioEvent>) {
        (
            std::mem::take(&mut self.events),
            std::mem::take(&mut self.audio_events),
        )
    }
}
