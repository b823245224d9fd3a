use super::*;
use crate::ai::{AiConfig, AiError, GiftRequest, HeuristicAi, PlayRequest, PlayStrategy, RandomPlayer};
use crate::config::SessionConfig;
use crate::domain::{Card, Deck, GameEvent, Move, Phase, RuleSet, Title};
use crate::errors::domain::DomainError;
use crate::persistence::MemorySink;
use crate::players::{HumanPrompt, ScriptedSource};

fn config() -> SessionConfig {
    SessionConfig {
        seed: Some(7),
        max_attempts: 3,
        ..SessionConfig::default()
    }
}

fn heuristic(seed: u64) -> Box<dyn PlayStrategy> {
    Box::new(HeuristicAi::new(AiConfig::with_seed(seed)))
}

/// Lays a card it does not hold.
struct Cheat;

impl PlayStrategy for Cheat {
    fn choose_move(&mut self, request: &PlayRequest<'_>) -> Result<Move, AiError> {
        let foreign = Deck::generate(&request.rules.deck)
            .cards()
            .iter()
            .copied()
            .find(|c| !request.hand.contains(c))
            .ok_or_else(|| AiError::Internal("holds the whole deck".into()))?;
        Ok(Move::Play(vec![foreign]))
    }

    fn choose_gift(&mut self, request: &GiftRequest<'_>) -> Result<Vec<Card>, AiError> {
        Ok(request.hand[..request.count].to_vec())
    }
}

/// Pulls the plug the first time it is asked.
struct Quitter(CancelToken);

impl PlayStrategy for Quitter {
    fn choose_move(&mut self, _request: &PlayRequest<'_>) -> Result<Move, AiError> {
        self.0.cancel();
        Ok(Move::Fold)
    }

    fn choose_gift(&mut self, _request: &GiftRequest<'_>) -> Result<Vec<Card>, AiError> {
        Err(AiError::Cancelled)
    }
}

/// Always fails to decide.
struct Broken;

impl PlayStrategy for Broken {
    fn choose_move(&mut self, _request: &PlayRequest<'_>) -> Result<Move, AiError> {
        Err(AiError::Internal("boom".into()))
    }

    fn choose_gift(&mut self, _request: &GiftRequest<'_>) -> Result<Vec<Card>, AiError> {
        Err(AiError::Internal("boom".into()))
    }
}

#[test]
fn ai_session_saves_one_record_per_game() {
    let sink = MemorySink::new();
    let events = RecordingAnnouncer::new();
    let mut table = Table::builder(RuleSet::default(), config())
        .fill_with_ai(4)
        .sink(sink.clone())
        .announcer(events.clone())
        .replay(GameBudget(3))
        .build()
        .unwrap();

    let report = table.run_session().unwrap();

    assert_eq!(report.games.len(), 3);
    assert!(!report.cancelled);
    assert_eq!(sink.len(), 3);
    assert_eq!(table.state().phase, Phase::Terminal);
    for record in sink.records() {
        assert_eq!(record.players.len(), 4);
        assert_eq!(record.winners.len(), 4);
        assert_eq!(record.winners[0].grade, Title::President);
        assert_eq!(record.winners[3].grade, Title::Troufion);
    }
    assert_eq!(
        events.count(|e| matches!(e, GameEvent::GameEnded { .. })),
        3
    );
    // Two pairs swap cards before games two and three.
    assert_eq!(
        events.count(|e| matches!(e, GameEvent::TributePaid { .. })),
        4
    );
    assert_eq!(
        events.count(|e| matches!(e, GameEvent::GiftReturned { .. })),
        4
    );
}

#[test]
fn game_budget_in_config_wins_over_replay() {
    let sink = MemorySink::new();
    let mut table = Table::builder(
        RuleSet::default(),
        SessionConfig {
            max_games: Some(2),
            ..config()
        },
    )
    .ai("a", Box::new(RandomPlayer::new(Some(1))))
    .ai("b", Box::new(RandomPlayer::new(Some(2))))
    .ai("c", heuristic(3))
    .sink(sink.clone())
    .replay(|_: u32| false)
    .build()
    .unwrap();

    let report = table.run_session().unwrap();
    assert_eq!(report.games.len(), 2);
    assert_eq!(sink.len(), 2);
    assert_eq!(table.games_played(), 2);
}

#[test]
fn empty_game_budget_plays_nothing() {
    let sink = MemorySink::new();
    let mut table = Table::builder(
        RuleSet::default(),
        SessionConfig {
            max_games: Some(0),
            ..config()
        },
    )
    .ai("a", Box::new(RandomPlayer::new(Some(1))))
    .ai("b", heuristic(2))
    .ai("c", heuristic(3))
    .sink(sink.clone())
    .replay(|_: u32| true)
    .build()
    .unwrap();

    let report = table.run_session().unwrap();
    assert!(report.games.is_empty());
    assert!(!report.cancelled);
    assert!(sink.is_empty());
    assert_eq!(table.games_played(), 0);
}

#[test]
fn unshuffled_three_players_open_with_the_queen_of_hearts() {
    let events = RecordingAnnouncer::new();
    let mut table = Table::builder(
        RuleSet::default(),
        SessionConfig {
            shuffle: false,
            ..config()
        },
    )
    .fill_with_ai(3)
    .announcer(events.clone())
    .build()
    .unwrap();

    table.play_game().unwrap();

    let log = events.events();
    assert_eq!(
        log[0],
        GameEvent::GameStarted {
            game_no: 1,
            hand_sizes: vec![18, 17, 17],
        }
    );
    // Generation order puts Q of hearts at index 22, dealt to seat 22 % 3.
    assert_eq!(
        log[1],
        GameEvent::RoundStarted {
            round_no: 1,
            start: 1,
        }
    );
}

#[test]
fn refused_answers_are_announced_then_folded() {
    let events = RecordingAnnouncer::new();
    let source = ScriptedSource::new()
        .play(&["nonsense"])
        .play(&["nonsense"])
        .play(&["nonsense"]);
    let sink = MemorySink::new();
    let mut table = Table::builder(
        RuleSet::default(),
        SessionConfig {
            shuffle: false,
            ..config()
        },
    )
    .human("ana", Box::new(HumanPrompt::new(source)))
    .ai("bot", heuristic(1))
    .announcer(events.clone())
    .sink(sink.clone())
    .build()
    .unwrap();

    let outcome = table.play_game().unwrap();

    assert!(matches!(outcome, GameOutcome::Finished(_)));
    let rejected = events.count(|e| {
        matches!(e, GameEvent::Rejected { seat: 0, reason } if reason == "no cards given")
    });
    assert_eq!(rejected, 3);
    assert_eq!(sink.len(), 1);
}

#[test]
fn cheating_aborts_without_a_record() {
    let events = RecordingAnnouncer::new();
    let sink = MemorySink::new();
    let mut table = Table::builder(
        RuleSet {
            queen_starts_first: false,
            ..RuleSet::default()
        },
        config(),
    )
    .ai("cheat", Box::new(Cheat))
    .ai("bot", heuristic(1))
    .announcer(events.clone())
    .sink(sink.clone())
    .build()
    .unwrap();

    let err = table.play_game().unwrap_err();

    assert!(matches!(err, DomainError::CheaterDetected { seat: 0, .. }));
    assert_eq!(table.state().phase, Phase::Aborted);
    assert!(sink.is_empty());
    assert_eq!(
        events.count(|e| matches!(e, GameEvent::Aborted { .. })),
        1
    );
}

#[test]
fn cancellation_parks_the_cards() {
    let token = CancelToken::new();
    let sink = MemorySink::new();
    let mut table = Table::builder(
        RuleSet {
            queen_starts_first: false,
            ..RuleSet::default()
        },
        config(),
    )
    .ai("quitter", Box::new(Quitter(token.clone())))
    .ai("bot", heuristic(1))
    .cancel_token(token)
    .sink(sink.clone())
    .replay(GameBudget(5))
    .build()
    .unwrap();

    let report = table.run_session().unwrap();

    assert!(report.cancelled);
    assert!(report.games.is_empty());
    assert!(sink.is_empty());
    let state = table.state();
    assert_eq!(state.phase, Phase::Cancelled);
    assert_eq!(state.cards_accounted(), 52);
    assert!(state.players.iter().all(|p| p.hand_len() == 0));
}

#[test]
fn failing_strategy_folds_and_the_game_still_ends() {
    let sink = MemorySink::new();
    let mut table = Table::builder(RuleSet::default(), config())
        .ai("broken", Box::new(Broken))
        .ai("bot", heuristic(2))
        .ai("bot2", heuristic(3))
        .sink(sink.clone())
        .replay(GameBudget(2))
        .build()
        .unwrap();

    let report = table.run_session().unwrap();

    assert_eq!(report.games.len(), 2);
    for summary in &report.games {
        assert_eq!(summary.troufion(), Some(0));
    }
}
