//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

/// Wave-unique monster identifier. Allocated from a monotonically
/// increasing counter and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(pub u32);

/// A descending enemy carrying an integer value (always >= 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub value: u32,
}

