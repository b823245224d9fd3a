// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::{Card, Rank, RuleSet, Suit};

/// Generate a random Suit
pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Spades),
        Just(Suit::Hearts),
        Just(Suit::Diamonds),
        Just(Suit::Clubs),
    ]
}

/// Generate a rank of the default 13-rank deck
pub fn rank() -> impl Strategy<Value = Rank> {
    (0u8..13).prop_map(Rank)
}

pub fn card() -> impl Strategy<Value = Card> {
    (rank(), suit()).prop_map(|(rank, suit)| Card::new(rank, suit))
}

/// Generate a table size the default deck supports comfortably
pub fn player_count() -> impl Strategy<Value = usize> {
    2usize..=7
}

/// Generate rule switches over the default deck
pub fn rules() -> impl Strategy<Value = RuleSet> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        0u8..=3,
    )
        .prop_map(
            |(ends_round, loses, revolution, pass_only, can_continue, skip, exchange)| RuleSet {
                best_card_ends_round: ends_round,
                best_card_loses: loses,
                revolution,
                fold_counts_as_played: pass_only,
                loser_can_continue: can_continue,
                skip_next_on_repeat: skip,
                exchange_cards: exchange,
                ..RuleSet::default()
            },
        )
}
