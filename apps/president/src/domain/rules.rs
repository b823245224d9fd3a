//! Configurable rule switches, exchange advantages and end-of-game titles.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::cards_types::{Card, Suit};
use super::deck::DeckSpec;
use crate::errors::domain::DomainError;

/// The card whose holder opens the first round of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingCard {
    pub rank: String,
    pub suit: Suit,
}

impl Default for StartingCard {
    fn default() -> Self {
        Self {
            rank: "Q".to_string(),
            suit: Suit::Hearts,
        }
    }
}

/// Rule switches for a table. Unknown keys are ignored when loading.
///
/// ```json
/// {"revolution": false, "exchange_cards": 1, "fold_counts_as_played": true}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Holder of `starting_card` opens the first round of the session.
    pub queen_starts_first: bool,
    /// Playing the strongest rank closes the round at once.
    pub best_card_ends_round: bool,
    /// Finishing a hand on the strongest rank ranks the player as a loser.
    pub best_card_loses: bool,
    /// A full set of one rank reverses the value order.
    pub revolution: bool,
    /// Folding only passes for the current cycle.
    pub fold_counts_as_played: bool,
    /// With `best_card_loses`, refuse the finishing play instead.
    pub loser_can_continue: bool,
    /// Matching the previous combination's rank skips the next player.
    pub skip_next_on_repeat: bool,
    /// Advantage of the president; vice ranks get one less.
    pub exchange_cards: u8,
    pub starting_card: StartingCard,
    pub deck: DeckSpec,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            queen_starts_first: true,
            best_card_ends_round: true,
            best_card_loses: false,
            revolution: true,
            fold_counts_as_played: false,
            loser_can_continue: false,
            skip_next_on_repeat: false,
            exchange_cards: 2,
            starting_card: StartingCard::default(),
            deck: DeckSpec::default(),
        }
    }
}

const BOOL_KEYS: [&str; 7] = [
    "queen_starts_first",
    "best_card_ends_round",
    "best_card_loses",
    "revolution",
    "fold_counts_as_played",
    "loser_can_continue",
    "skip_next_on_repeat",
];

impl RuleSet {
    /// Load from a JSON object. Missing keys keep their defaults.
    pub fn from_json(config: &JsonValue) -> Result<Self, DomainError> {
        serde_json::from_value(config.clone())
            .map_err(|e| DomainError::config(format!("invalid rules: {e}")))
    }

    /// Load from flat string pairs, e.g. a parsed settings file.
    pub fn from_map(pairs: &HashMap<String, String>) -> Result<Self, DomainError> {
        let mut object = Map::new();
        for (key, raw) in pairs {
            let raw = raw.trim();
            let value = if BOOL_KEYS.contains(&key.as_str()) {
                JsonValue::Bool(parse_flag(key, raw)?)
            } else if key == "exchange_cards" {
                let n: u8 = raw
                    .parse()
                    .map_err(|_| DomainError::config(format!("{key}: not a count: {raw:?}")))?;
                JsonValue::from(n)
            } else if key == "starting_card" {
                let (rank, suit) = raw.split_once(',').ok_or_else(|| {
                    DomainError::config(format!("{key}: expected rank,suit: {raw:?}"))
                })?;
                serde_json::json!({"rank": rank.trim(), "suit": suit.trim()})
            } else {
                continue;
            };
            object.insert(key.clone(), value);
        }
        Self::from_json(&JsonValue::Object(object))
    }

    /// Exchange advantage per ladder position (0 = president).
    ///
    /// Negative receives the strongest cards, positive owes them; the
    /// list is antisymmetric and the middle of an odd table is neutral.
    pub fn advantages(&self, players: usize) -> Vec<i8> {
        let n = i16::from(self.exchange_cards);
        (0..players)
            .map(|pos| {
                let from_bottom = players - 1 - pos;
                let (steps, sign) = match pos.cmp(&from_bottom) {
                    std::cmp::Ordering::Less => (pos, -1),
                    std::cmp::Ordering::Greater => (from_bottom, 1),
                    std::cmp::Ordering::Equal => return 0,
                };
                let amount = (n - steps as i16).max(0);
                (sign * amount) as i8
            })
            .collect()
    }

    /// Title for a ladder position.
    pub fn title(&self, position: usize, players: usize) -> Title {
        let advantages = self.advantages(players);
        if players >= 2 && position == 0 {
            return Title::President;
        }
        if players >= 2 && position + 1 == players {
            return Title::Troufion;
        }
        match advantages.get(position).copied().unwrap_or(0) {
            a if a < 0 => Title::VicePresident,
            a if a > 0 => Title::ViceTroufion,
            _ => Title::Neutral,
        }
    }

    /// Resolve the configured starting card against the deck.
    pub fn starting_card(&self) -> Result<Card, DomainError> {
        self.deck
            .card(&self.starting_card.rank, self.starting_card.suit)
    }

    /// Consistency checks that serde cannot express.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.loser_can_continue && !self.best_card_loses {
            tracing::debug!("loser_can_continue has no effect without best_card_loses");
        }
        if self.exchange_cards > i8::MAX as u8 {
            return Err(DomainError::config(format!(
                "exchange_cards {} is above {}",
                self.exchange_cards,
                i8::MAX
            )));
        }
        if usize::from(self.exchange_cards) > self.deck.deck_size() {
            return Err(DomainError::config(format!(
                "exchange_cards {} exceeds the deck",
                self.exchange_cards
            )));
        }
        Ok(())
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, DomainError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(DomainError::config(format!("{key}: not a flag: {raw:?}"))),
    }
}

/// End-of-game standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Title {
    President,
    VicePresident,
    Neutral,
    ViceTroufion,
    Troufion,
}

impl Title {
    pub fn label(self) -> &'static str {
        match self {
            Title::President => "President",
            Title::VicePresident => "Vice-President",
            Title::Neutral => "Neutral",
            Title::ViceTroufion => "Vice-Troufion",
            Title::Troufion => "Troufion",
        }
    }
}
