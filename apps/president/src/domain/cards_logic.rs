//! Card strength under the active value order, and hand helpers built on it.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Rank};
use crate::errors::domain::DomainError;

/// Strength ordering over a deck's ranks. A revolution reverses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueOrder {
    rank_count: u8,
    reversed: bool,
}

impl ValueOrder {
    pub fn new(rank_count: usize) -> Self {
        Self {
            rank_count: rank_count.min(u8::MAX as usize) as u8,
            reversed: false,
        }
    }

    pub fn rank_count(&self) -> usize {
        self.rank_count as usize
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Flip the order. Applying it twice restores the original.
    pub fn reverse(&mut self) {
        self.reversed = !self.reversed;
    }

    pub fn reset(&mut self) {
        self.reversed = false;
    }

    /// 0 for the weakest rank under the active order.
    pub fn strength(&self, rank: Rank) -> Result<usize, DomainError> {
        let idx = rank.index();
        if idx >= self.rank_count() {
            return Err(DomainError::InvalidComparison(format!(
                "rank #{idx} is outside a {}-rank order",
                self.rank_count
            )));
        }
        Ok(if self.reversed {
            self.rank_count() - 1 - idx
        } else {
            idx
        })
    }

    pub fn compare(&self, a: Rank, b: Rank) -> Result<Ordering, DomainError> {
        Ok(self.strength(a)?.cmp(&self.strength(b)?))
    }

    /// Whether `candidate` may be laid on `top` (equal strength allowed).
    pub fn can_cover(&self, candidate: Rank, top: Rank) -> Result<bool, DomainError> {
        Ok(self.compare(candidate, top)? != Ordering::Less)
    }

    pub fn strongest(&self) -> Rank {
        let last = self.rank_count.saturating_sub(1);
        if self.reversed {
            Rank(0)
        } else {
            Rank(last)
        }
    }

    pub fn weakest(&self) -> Rank {
        let last = self.rank_count.saturating_sub(1);
        if self.reversed {
            Rank(last)
        } else {
            Rank(0)
        }
    }

    /// Strength scaled to `0.0..=1.0`.
    pub fn normalized(&self, rank: Rank) -> Result<f32, DomainError> {
        let span = self.rank_count().saturating_sub(1).max(1) as f32;
        Ok(self.strength(rank)? as f32 / span)
    }

    /// All ranks, weakest first under the active order.
    pub fn ranks_weakest_first(&self) -> Vec<Rank> {
        let mut ranks: Vec<Rank> = (0..self.rank_count).map(Rank).collect();
        if self.reversed {
            ranks.reverse();
        }
        ranks
    }
}

/// Count of cards per rank in a hand.
pub fn rank_counts(hand: &[Card]) -> BTreeMap<Rank, usize> {
    let mut counts = BTreeMap::new();
    for card in hand {
        *counts.entry(card.rank).or_insert(0) += 1;
    }
    counts
}

/// The shared rank of a combination, if all cards agree.
pub fn common_rank(cards: &[Card]) -> Option<Rank> {
    let first = cards.first()?.rank;
    cards.iter().all(|c| c.rank == first).then_some(first)
}

/// Sort cards strongest first under `order`; ties broken by suit.
fn sort_by_strength_desc(cards: &mut [Card], order: &ValueOrder) {
    cards.sort_by(|a, b| {
        let sa = order.strength(a.rank).unwrap_or(0);
        let sb = order.strength(b.rank).unwrap_or(0);
        sb.cmp(&sa).then(a.suit.cmp(&b.suit))
    });
}

/// The `n` strongest cards of a hand under `order`.
pub fn strongest_cards(hand: &[Card], n: usize, order: &ValueOrder) -> Vec<Card> {
    let mut sorted = hand.to_vec();
    sort_by_strength_desc(&mut sorted, order);
    sorted.truncate(n);
    sorted
}

/// The `n` weakest cards of a hand under `order`.
pub fn weakest_cards(hand: &[Card], n: usize, order: &ValueOrder) -> Vec<Card> {
    let mut sorted = hand.to_vec();
    sort_by_strength_desc(&mut sorted, order);
    sorted.reverse();
    sorted.truncate(n);
    sorted
}

/// Multiset containment: every card in `cards` can be taken from `hand`.
///
/// Returns the first card that cannot be matched.
pub fn first_missing(hand: &[Card], cards: &[Card]) -> Option<Card> {
    let mut pool = hand.to_vec();
    for card in cards {
        match pool.iter().position(|c| c == card) {
            Some(pos) => {
                pool.swap_remove(pos);
            }
            None => return Some(*card),
        }
    }
    None
}
