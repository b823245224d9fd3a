//! Strategy trait and the views a strategy decides from.

use thiserror::Error;

use crate::domain::cards_logic::rank_counts;
use crate::domain::{Card, GameState, Move, Play, Rank, RuleSet, Seat, ValueOrder};
use crate::errors::domain::DomainError;

/// Errors that can occur while a strategy decides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    /// No answer arrived within the polling budget
    #[error("decision timeout")]
    Timeout,
    /// The table was cancelled while waiting
    #[error("cancelled")]
    Cancelled,
    /// The strategy encountered an internal error
    #[error("internal error: {0}")]
    Internal(String),
    /// The strategy produced an unusable answer
    #[error("invalid move: {0}")]
    InvalidMove(String),
}

/// What a seat sees when it is asked to play.
#[derive(Debug, Clone)]
pub struct PlayRequest<'a> {
    pub seat: Seat,
    pub hand: &'a [Card],
    /// Top combination of the pile; `None` when leading.
    pub pile_top: Option<&'a Play>,
    pub required_count: Option<usize>,
    pub order: ValueOrder,
    pub rules: &'a RuleSet,
    pub round_no: u32,
    /// 0 on the first ask, then one per refused answer.
    pub attempt: u32,
    /// Why the previous answer was refused.
    pub rejection: Option<String>,
}

impl<'a> PlayRequest<'a> {
    pub fn from_state(state: &'a GameState, seat: Seat) -> Result<Self, DomainError> {
        let player = state.player(seat)?;
        Ok(Self {
            seat,
            hand: player.hand(),
            pile_top: state.pile.top(),
            required_count: state.required_count,
            order: state.order,
            rules: &state.rules,
            round_no: state.round_no,
            attempt: 0,
            rejection: None,
        })
    }

    pub fn is_leading(&self) -> bool {
        self.pile_top.is_none()
    }

    pub fn revolution(&self) -> bool {
        self.order.is_reversed()
    }

    /// Rank groups of the hand, weakest first under the active order.
    pub fn groups(&self) -> Vec<(Rank, usize)> {
        let counts = rank_counts(self.hand);
        self.order
            .ranks_weakest_first()
            .into_iter()
            .filter_map(|r| counts.get(&r).map(|&c| (r, c)))
            .collect()
    }

    /// `rank` is at least as strong as the pile top.
    pub fn covers(&self, rank: Rank) -> bool {
        match self.pile_top.and_then(|p| p.cards.first()) {
            Some(top) => self.order.can_cover(rank, top.rank).unwrap_or(false),
            None => true,
        }
    }

    /// The hand still holds cards of the pile-top rank.
    pub fn holds_top_rank(&self) -> bool {
        self.pile_top
            .and_then(|p| p.cards.first())
            .is_some_and(|top| self.hand.iter().any(|c| c.rank == top.rank))
    }

    /// Laying `size` cards of `rank` would empty the hand on the best rank
    /// while the rules punish or forbid that.
    pub fn finishing_hurts(&self, rank: Rank, size: usize) -> bool {
        size == self.hand.len() && rank == self.order.strongest() && self.rules.best_card_loses
    }

    /// First `n` cards of `rank` in the hand.
    pub fn cards_of(&self, rank: Rank, n: usize) -> Vec<Card> {
        self.hand
            .iter()
            .filter(|c| c.rank == rank)
            .take(n)
            .copied()
            .collect()
    }

    /// Every legal combination, weakest first.
    pub fn legal_combinations(&self) -> Vec<Vec<Card>> {
        let mut out = Vec::new();
        for (rank, count) in self.groups() {
            if !self.covers(rank) {
                continue;
            }
            let sizes = match self.required_count {
                Some(r) => r..=r,
                None => 1..=count,
            };
            for size in sizes {
                if size == 0 || size > count {
                    continue;
                }
                if self.finishing_hurts(rank, size) && self.rules.loser_can_continue {
                    continue;
                }
                out.push(self.cards_of(rank, size));
            }
        }
        out
    }
}

/// What a seat sees when it must hand cards back during the exchange.
#[derive(Debug, Clone)]
pub struct GiftRequest<'a> {
    pub seat: Seat,
    pub receiver: Seat,
    pub hand: &'a [Card],
    pub count: usize,
    pub order: ValueOrder,
    pub rules: &'a RuleSet,
    pub attempt: u32,
    pub rejection: Option<String>,
}

impl<'a> GiftRequest<'a> {
    pub fn from_state(
        state: &'a GameState,
        seat: Seat,
        receiver: Seat,
        count: usize,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            seat,
            receiver,
            hand: state.player(seat)?.hand(),
            count,
            order: state.order,
            rules: &state.rules,
            attempt: 0,
            rejection: None,
        })
    }
}

/// Anything that can sit at a seat: AI, local human, remote human.
///
/// Answers are validated by the engine; refused answers come back with
/// `attempt` and `rejection` set.
pub trait PlayStrategy: Send {
    /// Choose a combination to lay, or fold.
    fn choose_move(&mut self, request: &PlayRequest<'_>) -> Result<Move, AiError>;

    /// Choose the cards to hand back after receiving a tribute.
    fn choose_gift(&mut self, request: &GiftRequest<'_>) -> Result<Vec<Card>, AiError>;
}
