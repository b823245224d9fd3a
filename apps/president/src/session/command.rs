use serde::{Deserialize, Serialize};

use crate::domain::{GameEvent, PlayerToken, Seat};
use crate::players::PromptView;

/// Everything a client can ask of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Join {
        name: String,
    },
    /// Answer the pending prompt. `None` folds.
    Submit {
        token: PlayerToken,
        cards: Option<Vec<String>>,
    },
    Snapshot {
        token: PlayerToken,
    },
    Leave {
        token: PlayerToken,
    },
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum Reply {
    /// `seat` is the join order. It moves down when an earlier joiner leaves
    /// before the start; read it back from a snapshot once the table is built.
    Joined { token: PlayerToken, seat: Seat },
    Accepted,
    Snapshot(SeatSnapshot),
    Left,
    Cancelled,
}

/// What one seat may see of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    pub seat: Seat,
    pub name: String,
    pub started: bool,
    /// The question this seat is expected to answer, if any.
    pub prompt: Option<PromptView>,
    /// Most recent events, oldest first.
    pub events: Vec<GameEvent>,
}
