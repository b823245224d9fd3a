//! Heuristic, the default deterministic AI.
//!
//! Leading:
//! - With revolutions enabled and a weak hand, lay a full set to reverse the order.
//! - Otherwise start from the largest group outside the best rank and shrink the
//!   combination while leading it would spend too much strength or too much hand.
//!
//! Following:
//! - Lay the weakest group that matches the required count exactly.
//! - Failing that, break up a group one card larger (configurable).
//! - Fold while still holding the pile-top rank, so a matching group is not
//!   raised over. Never finish on the best rank when that loses.
//!
//! Exchange:
//! - Hand back the weakest cards.
//!
//! Determinism:
//! - No randomness in decisions. `seed` only picks the generated name.

use crate::ai::{AiConfig, AiError, GiftRequest, PlayRequest, PlayStrategy};
use crate::domain::{weakest_cards, Card, Move, Rank};

#[derive(Debug, Clone)]
pub struct HeuristicAi {
    config: AiConfig,
}

impl HeuristicAi {
    pub const NAME: &'static str = "Heuristic";
    pub const VERSION: &'static str = "1.0.0";

    /// Below this mean hand strength a revolution is worth it.
    const REVOLUTION_INTEREST: f32 = 0.45;
    /// Above this overshoot score the lead combination shrinks.
    const OVERSHOOT_LIMIT: f32 = 0.55;

    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    // ---------- Utilities (pure, small, deterministic) ----------

    /// Mean normalised strength of the hand; 0 is all weakest cards.
    fn interest(req: &PlayRequest<'_>) -> f32 {
        if req.hand.is_empty() {
            return 1.0;
        }
        let total: f32 = req
            .hand
            .iter()
            .map(|c| req.order.normalized(c.rank).unwrap_or(1.0))
            .sum();
        total / req.hand.len() as f32
    }

    /// How much leading `size` cards would cost: strength of the group it
    /// would lead, plus the share of the hand, minus a bonus for having
    /// several groups of that size.
    fn overshoot(req: &PlayRequest<'_>, groups: &[(Rank, usize)], size: usize) -> f32 {
        let candidates: Vec<Rank> = groups
            .iter()
            .filter(|(_, count)| *count >= size)
            .map(|(rank, _)| *rank)
            .collect();
        let power = candidates
            .first()
            .and_then(|&r| req.order.normalized(r).ok())
            .unwrap_or(1.0);
        let share = size as f32 / req.hand.len().max(1) as f32;
        let breadth = candidates.len().saturating_sub(1) as f32;
        0.6 * power + 0.4 * share - 0.1 * breadth
    }

    /// Combination size to lead with.
    fn lead_size(req: &PlayRequest<'_>, groups: &[(Rank, usize)]) -> usize {
        let best = req.order.strongest();
        let full_set = req.rules.deck.suit_count();
        let ordinary: Vec<(Rank, usize)> =
            groups.iter().copied().filter(|(r, _)| *r != best).collect();

        if req.rules.revolution
            && Self::interest(req) < Self::REVOLUTION_INTEREST
            && ordinary.iter().any(|(_, c)| *c == full_set)
        {
            return full_set;
        }

        let Some(mut size) = ordinary.iter().map(|(_, c)| *c).max() else {
            return groups.iter().map(|(_, c)| *c).max().unwrap_or(1);
        };
        while size > 1 && Self::overshoot(req, &ordinary, size) > Self::OVERSHOOT_LIMIT {
            size -= 1;
        }
        size
    }

    /// Weakest playable group of exactly `group_size` cards, laying `size` of them.
    fn pick(
        req: &PlayRequest<'_>,
        groups: &[(Rank, usize)],
        size: usize,
        group_size: usize,
    ) -> Option<Vec<Card>> {
        groups
            .iter()
            .find(|(rank, count)| {
                *count == group_size && req.covers(*rank) && !req.finishing_hurts(*rank, size)
            })
            .map(|(rank, _)| req.cards_of(*rank, size))
    }

    /// A leader must lay something: weakest group that can supply the cards.
    fn forced_lead(
        req: &PlayRequest<'_>,
        groups: &[(Rank, usize)],
        size: usize,
    ) -> Option<Vec<Card>> {
        let safe = groups.iter().find_map(|(rank, count)| {
            (1..=size.min(*count))
                .rev()
                .find(|n| !req.finishing_hurts(*rank, *n))
                .map(|n| req.cards_of(*rank, n))
        });
        if safe.is_some() || req.rules.loser_can_continue {
            return safe;
        }
        // Only the best rank is left; finishing on it beats holding forever.
        groups
            .first()
            .map(|(rank, count)| req.cards_of(*rank, *count))
    }

    pub fn decide(&self, req: &PlayRequest<'_>) -> Move {
        if req.holds_top_rank() {
            return Move::Fold;
        }
        let groups = req.groups();
        let size = match req.required_count {
            Some(required) => required,
            None => Self::lead_size(req, &groups),
        };

        if let Some(cards) = Self::pick(req, &groups, size, size) {
            return Move::Play(cards);
        }
        if self.config.allow_split() {
            if let Some(cards) = Self::pick(req, &groups, size, size + 1) {
                return Move::Play(cards);
            }
        }
        if req.is_leading() {
            if let Some(cards) = Self::forced_lead(req, &groups, size) {
                return Move::Play(cards);
            }
        }
        Move::Fold
    }

    pub fn gift(&self, req: &GiftRequest<'_>) -> Vec<Card> {
        weakest_cards(req.hand, req.count, &req.order)
    }
}

impl PlayStrategy for HeuristicAi {
    fn choose_move(&mut self, request: &PlayRequest<'_>) -> Result<Move, AiError> {
        Ok(self.decide(request))
    }

    fn choose_gift(&mut self, request: &GiftRequest<'_>) -> Result<Vec<Card>, AiError> {
        if request.hand.len() < request.count {
            return Err(AiError::Internal(format!(
                "asked for {} cards with {} in hand",
                request.count,
                request.hand.len()
            )));
        }
        Ok(self.gift(request))
    }
}
