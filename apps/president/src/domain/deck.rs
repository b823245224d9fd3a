//! Deck description, generation, seeded shuffling and round-robin dealing.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

pub const DEFAULT_RANKS: [&str; 13] = [
    "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K", "A", "2",
];

/// Rank labels (weakest first) and the suits a deck is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDeckSpec")]
pub struct DeckSpec {
    ranks: Vec<String>,
    suits: Vec<Suit>,
}

#[derive(Deserialize)]
struct RawDeckSpec {
    ranks: Vec<String>,
    suits: Vec<Suit>,
}

impl TryFrom<RawDeckSpec> for DeckSpec {
    type Error = DomainError;

    fn try_from(raw: RawDeckSpec) -> Result<Self, Self::Error> {
        DeckSpec::new(raw.ranks, raw.suits)
    }
}

impl Default for DeckSpec {
    fn default() -> Self {
        Self {
            ranks: DEFAULT_RANKS.iter().map(|r| r.to_string()).collect(),
            suits: Suit::ALL.to_vec(),
        }
    }
}

impl DeckSpec {
    pub fn new(ranks: Vec<String>, suits: Vec<Suit>) -> Result<Self, DomainError> {
        if ranks.len() < 2 || ranks.len() > u8::MAX as usize {
            return Err(DomainError::config(format!(
                "deck needs between 2 and 255 ranks, got {}",
                ranks.len()
            )));
        }
        if suits.is_empty() {
            return Err(DomainError::config("deck needs at least one suit"));
        }
        let mut seen = HashSet::new();
        for label in &ranks {
            if label.is_empty() || label.contains(',') {
                return Err(DomainError::config(format!("bad rank label {label:?}")));
            }
            if !seen.insert(label.as_str()) {
                return Err(DomainError::config(format!("duplicate rank label {label}")));
            }
        }
        let distinct: HashSet<_> = suits.iter().collect();
        if distinct.len() != suits.len() {
            return Err(DomainError::config("duplicate suit in deck"));
        }
        Ok(Self { ranks, suits })
    }

    pub fn ranks(&self) -> &[String] {
        &self.ranks
    }

    pub fn suits(&self) -> &[Suit] {
        &self.suits
    }

    pub fn rank_count(&self) -> usize {
        self.ranks.len()
    }

    /// Cards per rank, which is also the size of a revolution.
    pub fn suit_count(&self) -> usize {
        self.suits.len()
    }

    pub fn deck_size(&self) -> usize {
        self.ranks.len() * self.suits.len()
    }

    pub fn rank(&self, label: &str) -> Result<Rank, DomainError> {
        self.ranks
            .iter()
            .position(|r| r == label)
            .map(|i| Rank(i as u8))
            .ok_or_else(|| DomainError::invalid_card(format!("unknown rank {label:?}")))
    }

    pub fn label(&self, rank: Rank) -> Option<&str> {
        self.ranks.get(rank.index()).map(String::as_str)
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.suits.contains(&suit)
    }

    pub fn contains(&self, card: Card) -> bool {
        card.rank.index() < self.ranks.len() && self.has_suit(card.suit)
    }

    /// Validated card construction from an in-range rank.
    pub fn card_at(&self, rank: Rank, suit: Suit) -> Result<Card, DomainError> {
        let card = Card::new(rank, suit);
        if !self.contains(card) {
            return Err(DomainError::invalid_card(format!(
                "rank #{} of {} is not part of this deck",
                rank.0,
                suit.name()
            )));
        }
        Ok(card)
    }

    /// Validated card construction from a rank label.
    pub fn card(&self, label: &str, suit: Suit) -> Result<Card, DomainError> {
        let rank = self.rank(label)?;
        self.card_at(rank, suit)
    }
}

/// A freshly generated deck, consumed by dealing.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Every rank of every suit, suit-major in spec order.
    pub fn generate(spec: &DeckSpec) -> Self {
        let mut cards = Vec::with_capacity(spec.deck_size());
        for &suit in spec.suits() {
            for i in 0..spec.rank_count() {
                cards.push(Card::new(Rank(i as u8), suit));
            }
        }
        Self { cards }
    }

    /// Fisher-Yates with a seeded ChaCha stream.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for i in (1..self.cards.len()).rev() {
            let j = rng.random_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deal every card round-robin starting at seat 0. Hands come back sorted.
    ///
    /// With a deck that does not divide evenly the first seats get one card more.
    pub fn deal(self, player_count: usize) -> Result<Vec<Vec<Card>>, DomainError> {
        if player_count < 2 {
            return Err(DomainError::config(format!(
                "at least 2 players are needed, got {player_count}"
            )));
        }
        if player_count > self.cards.len() {
            return Err(DomainError::config(format!(
                "{player_count} players cannot share {} cards",
                self.cards.len()
            )));
        }
        let mut hands: Vec<Vec<Card>> = vec![Vec::new(); player_count];
        for (i, card) in self.cards.into_iter().enumerate() {
            hands[i % player_count].push(card);
        }
        for hand in &mut hands {
            hand.sort();
        }
        Ok(hands)
    }
}

/// Generate, optionally shuffle, and deal a deck in one step.
pub fn deal_hands(
    spec: &DeckSpec,
    player_count: usize,
    seed: Option<u64>,
) -> Result<Vec<Vec<Card>>, DomainError> {
    let mut deck = Deck::generate(spec);
    if let Some(seed) = seed {
        deck.shuffle(seed);
    }
    deck.deal(player_count)
}
