use crate::domain::exchange::{current, pay_tribute, plan_exchange, return_gift};
use crate::domain::{
    start_game, strongest_cards, DealOutcome, ExchangePair, GameState, Phase, PlayerKind, RuleSet,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// A four-seat table dealt for its second game with a pending exchange.
fn exchanging_table() -> GameState {
    let seats = (0..4).map(|i| (format!("p{i}"), PlayerKind::Ai));
    let mut state = GameState::new(RuleSet::default(), seats).unwrap();
    let rules = state.rules.clone();
    state.exchange.plan = plan_exchange(&[2, 0, 3, 1], &rules.advantages(4));
    state.game_no = 1;
    state.phase = Phase::GameEnded;
    assert_eq!(
        start_game(&mut state, Some(99)).unwrap(),
        DealOutcome::ExchangePending
    );
    state
}

#[test]
fn plan_pairs_opposite_ends() {
    let plan = plan_exchange(&[2, 0, 3, 1], &[-2, -1, 1, 2]);
    assert_eq!(
        plan,
        vec![
            ExchangePair {
                debtor: 1,
                creditor: 2,
                count: 2
            },
            ExchangePair {
                debtor: 3,
                creditor: 0,
                count: 1
            },
        ]
    );
}

#[test]
fn plan_skips_neutral_positions() {
    let plan = plan_exchange(&[4, 3, 2, 1, 0], &[-1, 0, 0, 0, 1]);
    assert_eq!(plan.len(), 1);
    assert!(plan_exchange(&[0, 1], &[0, 0]).is_empty());
}

#[test]
fn tribute_moves_the_strongest_cards() {
    let mut state = exchanging_table();
    let pair = current(&state).unwrap();
    let order = state.order;
    let expected = strongest_cards(state.players[pair.debtor as usize].hand(), 2, &order);
    let paid = pay_tribute(&mut state).unwrap();
    assert_eq!(paid, expected);
    assert_eq!(state.players[pair.debtor as usize].hand_len(), 11);
    assert_eq!(state.players[pair.creditor as usize].hand_len(), 15);
    assert!(pay_tribute(&mut state).is_err(), "tribute is paid once");
}

#[test]
fn gift_must_come_from_the_creditor_with_the_right_size() {
    let mut state = exchanging_table();
    let pair = current(&state).unwrap();
    pay_tribute(&mut state).unwrap();

    let debtor_card = state.players[pair.debtor as usize].hand()[0];
    let err = return_gift(&mut state, pair.debtor, &[debtor_card, debtor_card]).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::OutOfTurn));

    let one = state.players[pair.creditor as usize].hand()[..1].to_vec();
    let err = return_gift(&mut state, pair.creditor, &one).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::WrongGiftSize));
    assert_eq!(state.phase, Phase::Exchanging);
}

#[test]
fn gifting_cards_not_held_aborts() {
    let mut state = exchanging_table();
    let pair = current(&state).unwrap();
    pay_tribute(&mut state).unwrap();
    let stolen = state.players[pair.debtor as usize].hand()[..2].to_vec();
    let err = return_gift(&mut state, pair.creditor, &stolen).unwrap_err();
    assert!(matches!(err, DomainError::CheaterDetected { .. }));
    assert_eq!(state.phase, Phase::Aborted);
}

#[test]
fn gift_before_tribute_is_a_phase_error() {
    let mut state = exchanging_table();
    let pair = current(&state).unwrap();
    let cards = state.players[pair.creditor as usize].hand()[..2].to_vec();
    assert!(matches!(
        return_gift(&mut state, pair.creditor, &cards),
        Err(DomainError::Phase(_))
    ));
}
