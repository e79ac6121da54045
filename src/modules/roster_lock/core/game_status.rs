// NHL game state for a club on a date, as reported by schedule ingestion.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Scheduled,
    Live,
    Intermission,
    Final,
    Postponed,
}

impl GameStatus {
    /// Puck has dropped. Intermission is part of a live game.
    pub fn has_started(self) -> bool {
        matches!(
            self,
            GameStatus::Live | GameStatus::Intermission | GameStatus::Final
        )
    }
}
