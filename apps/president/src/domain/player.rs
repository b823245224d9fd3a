//! Seated player: identity, hand and per-round flags.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cards_logic::first_missing;
use super::cards_types::Card;
use super::rules::Title;
use super::state::Seat;

/// Opaque handle a remote client uses to address its seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerToken(pub Uuid);

impl PlayerToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Ai,
}

/// How a player left the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Finish {
    Won,
    Lost,
}

/// Standing assigned at the end of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankAssignment {
    pub game_no: u32,
    /// 1-based ladder position.
    pub position: u8,
    pub title: Title,
    pub advantage: i8,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub seat: Seat,
    pub token: PlayerToken,
    pub name: String,
    pub kind: PlayerKind,
    hand: Vec<Card>,
    /// Out of the current round.
    pub folded: bool,
    /// Already acted in the current cycle.
    pub played: bool,
    pub finish: Option<Finish>,
    pub rank: Option<RankAssignment>,
    pub rank_history: Vec<RankAssignment>,
}

impl Player {
    pub fn new(seat: Seat, name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            seat,
            token: PlayerToken::new(),
            name: name.into(),
            kind,
            hand: Vec::new(),
            folded: false,
            played: false,
            finish: None,
            rank: None,
            rank_history: Vec::new(),
        }
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn hand_len(&self) -> usize {
        self.hand.len()
    }

    pub fn holds(&self, card: Card) -> bool {
        self.hand.contains(&card)
    }

    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }

    pub fn is_finished(&self) -> bool {
        self.finish.is_some()
    }

    /// Still contesting the current round.
    pub fn is_live(&self) -> bool {
        !self.is_finished() && !self.folded
    }

    /// Can be handed the turn in the current cycle.
    pub fn is_eligible(&self) -> bool {
        self.is_live() && !self.played
    }

    pub fn give_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
        self.hand.sort();
    }

    /// Remove `cards` from the hand, or report the first one not held.
    pub fn take_cards(&mut self, cards: &[Card]) -> Result<(), Card> {
        if let Some(missing) = first_missing(&self.hand, cards) {
            return Err(missing);
        }
        for card in cards {
            if let Some(pos) = self.hand.iter().position(|c| c == card) {
                self.hand.remove(pos);
            }
        }
        Ok(())
    }

    /// Empty the hand, e.g. when a game is cancelled.
    pub fn drain_hand(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.hand)
    }

    pub fn reset_round_flags(&mut self) {
        self.folded = false;
        self.played = false;
    }

    /// Back to a fresh seat for a new game; rank history is kept.
    pub fn reset_for_game(&mut self) {
        self.hand.clear();
        self.reset_round_flags();
        self.finish = None;
    }

    pub fn assign_rank(&mut self, rank: RankAssignment) {
        self.rank = Some(rank);
        self.rank_history.push(rank);
    }
}
