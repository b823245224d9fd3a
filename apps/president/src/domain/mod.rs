//! Domain layer: pure game logic types and helpers.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod events;
pub mod exchange;
pub mod ladder;
pub mod lifecycle;
pub mod play;
pub mod player;
pub mod round;
pub mod rules;
pub mod seed_derivation;
pub mod state;
pub mod turns;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
pub(crate) mod test_state_helpers;
#[cfg(test)]
mod tests_exchange;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_rounds;

// Re-exports for ergonomics
pub use cards_logic::{rank_counts, strongest_cards, weakest_cards, ValueOrder};
pub use cards_types::{Card, Rank, Suit};
pub use deck::{deal_hands, Deck, DeckSpec};
pub use events::GameEvent;
pub use ladder::{GameSummary, Standing};
pub use lifecycle::{cancel, close, start_game, DealOutcome};
pub use play::{apply_move, legal_combinations, Move, MoveKind, MoveOutcome};
pub use player::{Finish, Player, PlayerKind, PlayerToken, RankAssignment};
pub use round::{begin_cycle, end_round, next_turn, start_next_round, RoundSummary};
pub use rules::{RuleSet, StartingCard, Title};
pub use seed_derivation::{derive_ai_seed, derive_dealing_seed};
pub use state::{ExchangePair, GameState, LadderEntry, Phase, Pile, Play, Seat};
pub use turns::{Turn, TurnCursor};
