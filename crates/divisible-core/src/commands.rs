//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a new game from the menu or the game-over screen.
    StartGame,
    /// Throw one ball of the given value.
    ThrowBall { value: u32 },
    /// Abandon the session and return to the menu.
    RequestMenu,
}
