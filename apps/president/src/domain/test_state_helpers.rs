//! Test-only game state helpers for domain unit tests.

use crate::domain::round::{begin_cycle, begin_round, next_turn};
use crate::domain::{
    apply_move, legal_combinations, Card, Deck, GameState, Move, MoveOutcome, Phase, PlayerKind,
    RuleSet, Seat, Turn,
};
use crate::errors::domain::DomainError;

/// A state with the given hands and a round open at `start`.
///
/// Cards not dealt to anyone are parked as an earlier archived round so the
/// conservation check still balances.
pub fn round_with_hands(rules: RuleSet, hands: &[&[&str]], start: Seat) -> GameState {
    let seats = (0..hands.len()).map(|i| (format!("p{i}"), PlayerKind::Ai));
    let mut state = GameState::new(rules, seats).expect("valid table");
    let spec = state.rules.deck.clone();
    let mut dealt = Vec::new();
    for (seat, tokens) in hands.iter().enumerate() {
        let cards = spec.try_parse_cards(tokens.iter()).expect("valid tokens");
        dealt.extend(cards.iter().copied());
        state.players[seat].give_cards(cards);
    }
    let rest: Vec<Card> = Deck::generate(&spec)
        .cards()
        .iter()
        .filter(|c| !dealt.contains(c))
        .copied()
        .collect();
    state.history.push(vec![crate::domain::Play {
        seat: 0,
        cards: rest,
    }]);
    state.game_no = 1;
    begin_round(&mut state, start);
    state
}

pub fn cards(state: &GameState, tokens: &[&str]) -> Vec<Card> {
    state
        .rules
        .deck
        .try_parse_cards(tokens.iter())
        .expect("valid tokens")
}

/// Hand out the next turn, starting a new cycle when needed.
pub fn advance(state: &mut GameState) -> Seat {
    loop {
        match next_turn(state) {
            Turn::Active(seat) => return seat,
            Turn::Paused => assert!(begin_cycle(state), "nobody left to act"),
            Turn::RoundOver => panic!("round is over"),
        }
    }
}

/// Advance, check whose turn it is, and play `tokens` (empty means fold).
pub fn act(
    state: &mut GameState,
    expected: Seat,
    tokens: &[&str],
) -> Result<MoveOutcome, DomainError> {
    if state.turn.is_none() {
        let seat = advance(state);
        assert_eq!(seat, expected, "unexpected turn");
    }
    let mv = if tokens.is_empty() {
        Move::Fold
    } else {
        Move::Play(cards(state, tokens))
    };
    apply_move(state, expected, mv)
}

/// Weakest legal combination or a fold; a stand-in player for flow tests.
pub fn greedy_move(state: &GameState, seat: Seat) -> Move {
    legal_combinations(state, seat)
        .into_iter()
        .next()
        .map_or(Move::Fold, Move::Play)
}

/// Play rounds with `greedy_move` until the game ends. Returns moves made.
pub fn play_out_game(state: &mut GameState, max_moves: usize) -> usize {
    let mut moves = 0;
    while state.phase != Phase::GameEnded {
        assert!(moves < max_moves, "game did not end in {max_moves} moves");
        match state.phase {
            Phase::RoundEnded => {
                crate::domain::start_next_round(state).expect("next round");
                continue;
            }
            Phase::RoundInProgress => {}
            other => panic!("unexpected phase {other:?}"),
        }
        match next_turn(state) {
            Turn::Active(seat) => {
                assert!(
                    !state.players[seat as usize].is_finished(),
                    "finished player got the turn"
                );
                let mv = greedy_move(state, seat);
                apply_move(state, seat, mv).expect("greedy moves are legal");
                state.check_conservation().expect("cards conserved");
                moves += 1;
            }
            Turn::Paused => {
                if !begin_cycle(state) {
                    crate::domain::end_round(state).expect("end round");
                }
            }
            Turn::RoundOver => {
                crate::domain::end_round(state).expect("end round");
            }
        }
    }
    moves
}
