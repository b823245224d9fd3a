//! Circular turn order over the seated players.

use serde::{Deserialize, Serialize};

use super::player::Player;
use super::state::Seat;

/// What the cursor yields when asked for the next actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    /// This seat acts next.
    Active(Seat),
    /// Everyone live has acted this cycle; the driver starts a new one.
    Paused,
    /// Nobody unfinished is left in the round.
    RoundOver,
}

/// Position in the seating circle from which the next actor is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCursor {
    cursor: usize,
}

impl TurnCursor {
    pub fn new(start: Seat) -> Self {
        Self {
            cursor: start as usize,
        }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Next eligible seat, scanning circularly from the cursor. Advances past it.
    pub fn next(&mut self, players: &[Player]) -> Turn {
        let turn = self.peek(players);
        if let Turn::Active(seat) = turn {
            self.cursor = (seat as usize + 1) % players.len();
        }
        turn
    }

    /// Same answer as `next`, without moving.
    pub fn peek(&self, players: &[Player]) -> Turn {
        if players.is_empty() || players.iter().all(|p| !p.is_live()) {
            return Turn::RoundOver;
        }
        let n = players.len();
        (0..n)
            .map(|offset| (self.cursor + offset) % n)
            .find(|&i| players[i].is_eligible())
            .map_or(Turn::Paused, |i| Turn::Active(players[i].seat))
    }
}

/// Seat following `seat` in the circle, regardless of state.
pub fn next_seat(seat: Seat, player_count: usize) -> Seat {
    ((seat as usize + 1) % player_count.max(1)) as Seat
}

/// First unfinished seat at or after `from`.
pub fn first_unfinished_from(players: &[Player], from: Seat) -> Option<Seat> {
    let n = players.len();
    (0..n)
        .map(|offset| (from as usize + offset) % n)
        .find(|&i| !players[i].is_finished())
        .map(|i| players[i].seat)
}
