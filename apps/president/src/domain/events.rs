//! Announcements emitted by the table driver as a game unfolds.

use serde::{Deserialize, Serialize};

use super::cards_types::Card;
use super::ladder::GameSummary;
use super::player::Finish;
use super::state::Seat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        game_no: u32,
        hand_sizes: Vec<usize>,
    },
    TributePaid {
        from: Seat,
        to: Seat,
        count: usize,
    },
    GiftReturned {
        from: Seat,
        to: Seat,
        count: usize,
    },
    RoundStarted {
        round_no: u32,
        start: Seat,
    },
    TurnBecame {
        seat: Seat,
    },
    CardsPlayed {
        seat: Seat,
        cards: Vec<Card>,
    },
    Folded {
        seat: Seat,
    },
    Passed {
        seat: Seat,
    },
    Skipped {
        seat: Seat,
    },
    /// A move was refused and the player is asked again.
    Rejected {
        seat: Seat,
        reason: String,
    },
    Revolution {
        active: bool,
    },
    PlayerFinished {
        seat: Seat,
        finish: Finish,
    },
    RoundEnded {
        round_no: u32,
        taken_by: Option<Seat>,
    },
    GameEnded {
        summary: GameSummary,
    },
    Aborted {
        reason: String,
    },
    Cancelled,
}
