//! Card parsing from the `"<rank>,<suit>"` wire form (e.g. `"Q,hearts"`).

use std::str::FromStr;

use super::cards_types::{Card, Suit};
use super::deck::DeckSpec;
use crate::errors::domain::DomainError;

impl FromStr for Suit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spades" | "♠" => Ok(Suit::Spades),
            "hearts" | "♥" => Ok(Suit::Hearts),
            "diamonds" | "♦" => Ok(Suit::Diamonds),
            "clubs" | "♣" => Ok(Suit::Clubs),
            _ => Err(DomainError::invalid_card(format!("unknown suit {s:?}"))),
        }
    }
}

impl DeckSpec {
    /// Parse one `"<rank>,<suit>"` token against this deck.
    pub fn parse_card(&self, token: &str) -> Result<Card, DomainError> {
        let (rank, suit) = token
            .trim()
            .split_once(',')
            .ok_or_else(|| DomainError::invalid_card(format!("expected rank,suit: {token:?}")))?;
        let suit: Suit = suit.trim().parse()?;
        self.card(rank.trim(), suit)
    }

    /// Non-panicking helper to parse a batch of tokens.
    pub fn try_parse_cards<I, S>(&self, tokens: I) -> Result<Vec<Card>, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|s| self.parse_card(s.as_ref()))
            .collect()
    }

    /// Wire form, the inverse of `parse_card`.
    pub fn format_card(&self, card: Card) -> String {
        let label = self.label(card.rank).unwrap_or("?");
        format!("{label},{}", card.suit.name())
    }

    pub fn format_cards(&self, cards: &[Card]) -> Vec<String> {
        cards.iter().map(|&c| self.format_card(c)).collect()
    }

    /// Compact form for announcements, e.g. `Q♥ Q♠`.
    pub fn display_cards(&self, cards: &[Card]) -> String {
        cards
            .iter()
            .map(|c| format!("{}{}", self.label(c.rank).unwrap_or("?"), c.suit.symbol()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
