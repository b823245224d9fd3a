//! Text view of a decision, shown to a human player.

use serde::{Deserialize, Serialize};

use crate::ai::{GiftRequest, PlayRequest};
use crate::domain::Seat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromptKind {
    Play,
    Gift { receiver: Seat, count: usize },
}

/// Cards are in `"<rank>,<suit>"` form so a client can echo them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptView {
    pub seat: Seat,
    pub kind: PromptKind,
    pub hand: Vec<String>,
    /// Empty when leading or during the exchange.
    pub pile_top: Vec<String>,
    pub required_count: Option<usize>,
    pub revolution: bool,
    pub attempt: u32,
    pub rejection: Option<String>,
}

impl PromptView {
    pub fn for_play(req: &PlayRequest<'_>) -> Self {
        let deck = &req.rules.deck;
        Self {
            seat: req.seat,
            kind: PromptKind::Play,
            hand: deck.format_cards(req.hand),
            pile_top: req
                .pile_top
                .map(|p| deck.format_cards(&p.cards))
                .unwrap_or_default(),
            required_count: req.required_count,
            revolution: req.revolution(),
            attempt: req.attempt,
            rejection: req.rejection.clone(),
        }
    }

    pub fn for_gift(req: &GiftRequest<'_>) -> Self {
        Self {
            seat: req.seat,
            kind: PromptKind::Gift {
                receiver: req.receiver,
                count: req.count,
            },
            hand: req.rules.deck.format_cards(req.hand),
            pile_top: Vec::new(),
            required_count: Some(req.count),
            revolution: req.order.is_reversed(),
            attempt: req.attempt,
            rejection: req.rejection.clone(),
        }
    }

    pub fn is_gift(&self) -> bool {
        matches!(self.kind, PromptKind::Gift { .. })
    }
}
