#![allow(dead_code)]

use president::domain::{
    apply_move, begin_cycle, end_round, legal_combinations, next_turn, start_next_round,
    GameState, Move, Phase, PlayerKind, RuleSet, Turn,
};
use president::SessionConfig;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    president_test_support::logging::init();
}

pub fn seeded_config(seed: u64) -> SessionConfig {
    SessionConfig {
        seed: Some(seed),
        tick_ms: 2,
        retries: 500,
        max_attempts: 5,
        ..SessionConfig::default()
    }
}

pub fn new_state(rules: RuleSet, players: usize) -> GameState {
    let seats = (0..players).map(|i| (format!("p{i}"), PlayerKind::Ai));
    GameState::new(rules, seats).expect("valid table")
}

pub fn tokens(state: &GameState, seat: u8) -> Vec<String> {
    state
        .rules
        .deck
        .format_cards(state.players[seat as usize].hand())
}

/// Play the current game to its end with the weakest legal combination.
pub fn play_out(state: &mut GameState) {
    let mut moves = 0;
    while state.phase != Phase::GameEnded {
        assert!(moves < 5_000, "game did not end");
        if state.phase == Phase::RoundEnded {
            start_next_round(state).expect("next round");
            continue;
        }
        match next_turn(state) {
            Turn::Active(seat) => {
                let mv = legal_combinations(state, seat)
                    .into_iter()
                    .next()
                    .map_or(Move::Fold, Move::Play);
                apply_move(state, seat, mv).expect("legal move");
                moves += 1;
            }
            Turn::Paused if begin_cycle(state) => {}
            Turn::Paused | Turn::RoundOver => {
                end_round(state).expect("round closes");
            }
        }
    }
}
