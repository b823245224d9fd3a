use crate::domain::exchange::{current, pay_tribute, return_gift};
use crate::domain::test_state_helpers::{act, play_out_game, round_with_hands};
use crate::domain::{
    end_round, start_game, weakest_cards, DealOutcome, GameState, Phase, PlayerKind, RuleSet,
    Title,
};

fn table(n: usize, rules: RuleSet) -> GameState {
    let seats = (0..n).map(|i| (format!("p{i}"), PlayerKind::Ai));
    GameState::new(rules, seats).unwrap()
}

#[test]
fn queen_of_hearts_holder_opens_the_first_game() {
    let mut state = table(4, RuleSet::default());
    let outcome = start_game(&mut state, Some(42)).unwrap();
    let queen = state.rules.starting_card().unwrap();
    let holder = state.players.iter().find(|p| p.holds(queen)).unwrap().seat;
    assert_eq!(outcome, DealOutcome::RoundOpened(holder));
    assert_eq!(state.round_start, holder);
    assert_eq!(state.phase, Phase::RoundInProgress);
}

#[test]
fn without_the_queen_rule_seat_zero_opens() {
    let rules = RuleSet {
        queen_starts_first: false,
        ..RuleSet::default()
    };
    let mut state = table(4, rules);
    assert_eq!(
        start_game(&mut state, Some(42)).unwrap(),
        DealOutcome::RoundOpened(0)
    );
}

#[test]
fn deal_is_round_robin_from_seat_zero() {
    let mut state = table(3, RuleSet::default());
    start_game(&mut state, Some(1)).unwrap();
    let sizes: Vec<usize> = state.players.iter().map(|p| p.hand_len()).collect();
    assert_eq!(sizes, vec![18, 17, 17]);
    state.check_conservation().unwrap();
}

#[test]
fn dealing_twice_without_finishing_is_refused() {
    let mut state = table(4, RuleSet::default());
    start_game(&mut state, Some(1)).unwrap();
    assert!(start_game(&mut state, Some(2)).is_err());
}

#[test]
fn nobody_playing_passes_the_lead_on() {
    let mut state = round_with_hands(
        RuleSet::default(),
        &[&["5,spades"], &["6,spades"], &["7,spades"]],
        1,
    );
    act(&mut state, 1, &[]).unwrap();
    act(&mut state, 2, &[]).unwrap();
    let outcome = act(&mut state, 0, &[]).unwrap();
    let summary = outcome.round_ended.expect("all folded");
    assert_eq!(summary.taken_by, None);
    assert_eq!(summary.next_start, Some(2));
}

#[test]
fn round_over_from_cursor_can_be_closed() {
    let mut state = round_with_hands(
        RuleSet::default(),
        &[&["5,spades"], &["6,spades"]],
        0,
    );
    for p in &mut state.players {
        p.folded = true;
    }
    let summary = end_round(&mut state).unwrap();
    assert_eq!(summary.next_start, Some(1));
    assert_eq!(state.phase, Phase::RoundEnded);
}

#[test]
fn full_game_ranks_everyone() {
    let mut state = table(4, RuleSet::default());
    start_game(&mut state, Some(7)).unwrap();
    play_out_game(&mut state, 500);

    assert_eq!(state.phase, Phase::GameEnded);
    let ladder = state.ladder();
    assert_eq!(ladder.len(), 4);
    let mut seats: Vec<u8> = ladder.iter().map(|e| e.seat).collect();
    seats.sort();
    assert_eq!(seats, vec![0, 1, 2, 3]);

    let president = &state.players[ladder[0].seat as usize];
    let rank = president.rank.unwrap();
    assert_eq!(rank.title, Title::President);
    assert_eq!(rank.advantage, -2);
    let troufion = &state.players[ladder[3].seat as usize];
    assert_eq!(troufion.rank.unwrap().title, Title::Troufion);
    assert_eq!(troufion.rank_history.len(), 1);

    assert_eq!(state.exchange.plan.len(), 2);
    assert_eq!(state.exchange.plan[0].debtor, ladder[3].seat);
    assert_eq!(state.exchange.plan[0].creditor, ladder[0].seat);
    assert_eq!(state.exchange.plan[0].count, 2);
    state.check_conservation().unwrap();
}

#[test]
fn second_game_starts_with_the_exchange() {
    let mut state = table(4, RuleSet::default());
    start_game(&mut state, Some(11)).unwrap();
    play_out_game(&mut state, 500);
    let ladder: Vec<u8> = state.ladder().iter().map(|e| e.seat).collect();
    let opener = state.next_start;

    assert_eq!(
        start_game(&mut state, Some(12)).unwrap(),
        DealOutcome::ExchangePending
    );
    assert_eq!(state.game_no, 2);
    while let Some(pair) = current(&state) {
        let tribute = pay_tribute(&mut state).unwrap();
        assert_eq!(tribute.len(), pair.count);
        for card in &tribute {
            assert!(state.players[pair.creditor as usize].holds(*card));
        }
        let order = state.order;
        let gift = weakest_cards(state.players[pair.creditor as usize].hand(), pair.count, &order);
        return_gift(&mut state, pair.creditor, &gift).unwrap();
    }
    assert_eq!(state.phase, Phase::RoundInProgress);
    assert!(state.winners.is_empty() && state.losers.is_empty());
    assert!(state.players.iter().all(|p| p.hand_len() == 13));
    assert_eq!(Some(state.round_start), opener);
    assert_eq!(state.players[ladder[0] as usize].rank_history.len(), 1);

    play_out_game(&mut state, 500);
    assert!(state.players.iter().all(|p| p.rank_history.len() == 2));
    for player in &state.players {
        let games: Vec<u32> = player.rank_history.iter().map(|r| r.game_no).collect();
        assert_eq!(games, vec![1, 2]);
    }
}

#[test]
fn close_after_game_is_terminal() {
    let mut state = table(2, RuleSet::default());
    start_game(&mut state, Some(3)).unwrap();
    assert!(crate::domain::close(&mut state).is_err());
    play_out_game(&mut state, 500);
    crate::domain::close(&mut state).unwrap();
    assert_eq!(state.phase, Phase::Terminal);
}

#[test]
fn cancel_parks_every_card() {
    let mut state = table(4, RuleSet::default());
    start_game(&mut state, Some(5)).unwrap();
    crate::domain::cancel(&mut state);
    assert_eq!(state.phase, Phase::Cancelled);
    assert!(state.players.iter().all(|p| p.hand_len() == 0));
    assert_eq!(state.unresolved.len(), 52);
    state.check_conservation().unwrap();
    // a second cancel is a no-op
    crate::domain::cancel(&mut state);
    assert_eq!(state.unresolved.len(), 52);
}
