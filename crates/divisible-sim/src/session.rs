//! Per-game counters owned by the lifecycle.

use divisible_core::enums::GameOverReason;
use divisible_core::events::GameEvent;
use divisible_core::state::ScoreView;

use crate::feedback::Feedback;

/// Running score state tracked by the engine. Reset on every new game.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub score: u64,
    pub defeated: u32,
    /// Throws that found no divisible target.
    pub misses: u32,
    pub throws: u32,
    pub game_over_reason: Option<GameOverReason>,
}

impl ScoreState {
    pub fn award(&mut self, points: u64, feedback: &mut Feedback) {
        if points == 0 {
            return;
        }
        self.score = self.score.saturating_add(points);
        feedback.emit(GameEvent::ScoreChanged { score: self.score });
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            defeated: self.defeated,
            misses: self.misses,
            throws: self.throws,
            game_over_reason: self.game_over_reason,
        }
    }
}
