use super::*;
use crate::config::SessionConfig;
use crate::domain::{PlayerToken, RuleSet};
use crate::errors::domain::DomainError;
use crate::persistence::MemorySink;
use crate::players::{PromptKind, PromptView};

fn session(seats: usize) -> std::sync::Arc<Session> {
    Session::new(
        RuleSet::default(),
        SessionConfig {
            seats,
            seed: Some(11),
            tick_ms: 1,
            retries: 1,
            ..SessionConfig::default()
        },
    )
}

fn join(session: &Session, name: &str) -> PlayerToken {
    match session.dispatch(Command::Join { name: name.into() }) {
        Ok(Reply::Joined { token, .. }) => token,
        other => panic!("unexpected reply {other:?}"),
    }
}

fn waiting_prompt() -> PromptView {
    PromptView {
        seat: 0,
        kind: PromptKind::Play,
        hand: vec!["Q,hearts".into()],
        pile_top: Vec::new(),
        required_count: None,
        revolution: false,
        attempt: 0,
        rejection: None,
    }
}

#[test]
fn joins_fill_seats_in_order() {
    let session = session(2);
    let first = session.dispatch(Command::Join { name: "ana".into() }).unwrap();
    assert!(matches!(first, Reply::Joined { seat: 0, .. }));
    let second = session.dispatch(Command::Join { name: "bo".into() }).unwrap();
    assert!(matches!(second, Reply::Joined { seat: 1, .. }));

    let full = session.dispatch(Command::Join { name: "cy".into() });
    assert!(matches!(full, Err(DomainError::Conflict(_))));
}

#[test]
fn duplicate_and_empty_names_are_refused() {
    let session = session(4);
    join(&session, "ana");
    assert!(matches!(
        session.dispatch(Command::Join { name: " ana ".into() }),
        Err(DomainError::Conflict(_))
    ));
    assert!(matches!(
        session.dispatch(Command::Join { name: "  ".into() }),
        Err(DomainError::Config(_))
    ));
}

#[test]
fn unknown_tokens_are_not_found() {
    let session = session(4);
    let stranger = PlayerToken::new();
    for command in [
        Command::Snapshot { token: stranger },
        Command::Leave { token: stranger },
        Command::Submit {
            token: stranger,
            cards: None,
        },
    ] {
        assert!(matches!(
            session.dispatch(command),
            Err(DomainError::PlayerNotFound(_))
        ));
    }
}

#[test]
fn submissions_are_parsed_and_replaced() {
    let session = session(4);
    let token = join(&session, "ana");

    let bad = session.dispatch(Command::Submit {
        token,
        cards: Some(vec!["Z,hearts".into()]),
    });
    assert!(matches!(bad, Err(DomainError::InvalidCard(_))));
    assert!(!session.mailbox().has_pending(token));

    session.mailbox().post_prompt(token, waiting_prompt());
    session
        .dispatch(Command::Submit {
            token,
            cards: Some(vec!["Q,hearts".into()]),
        })
        .unwrap();
    session
        .dispatch(Command::Submit { token, cards: None })
        .unwrap();
    assert_eq!(
        session
            .mailbox()
            .wait_for(token, std::time::Duration::from_millis(1), 0),
        Ok(crate::players::Submission::Fold)
    );
}

#[test]
fn answers_without_an_open_question_are_refused() {
    let session = session(4);
    let token = join(&session, "ana");

    let early = session.dispatch(Command::Submit { token, cards: None });
    assert!(matches!(early, Err(DomainError::Conflict(_))));
    assert!(!session.mailbox().has_pending(token));

    session.mailbox().post_prompt(token, waiting_prompt());
    assert_eq!(
        session.mailbox().wait_for(token, std::time::Duration::from_millis(1), 0),
        Err(crate::ai::AiError::Timeout)
    );
    let late = session.dispatch(Command::Submit { token, cards: None });
    assert!(matches!(late, Err(DomainError::Conflict(_))));
    assert!(!session.mailbox().has_pending(token));
}

#[test]
fn leaving_before_the_start_frees_the_seat() {
    let session = session(4);
    let ana = join(&session, "ana");
    let bo = join(&session, "bo");
    assert_eq!(session.dispatch(Command::Leave { token: ana }).unwrap(), Reply::Left);
    assert_eq!(session.snapshot(bo).unwrap().seat, 0);
    assert!(matches!(
        session.dispatch(Command::Snapshot { token: ana }),
        Err(DomainError::PlayerNotFound(_))
    ));

    let cy = session.dispatch(Command::Join { name: "cy".into() }).unwrap();
    assert!(matches!(cy, Reply::Joined { seat: 1, .. }));
    let table = session.build_table(MemorySink::new()).unwrap();
    assert_eq!(table.state().players[0].token, bo);
}

#[test]
fn roster_closes_once_the_table_is_built() {
    let session = session(3);
    let ana = join(&session, "ana");
    let table = session.build_table(MemorySink::new()).unwrap();

    assert_eq!(table.state().player_count(), 3);
    assert_eq!(table.state().seat_of(ana).unwrap(), 0);
    assert!(matches!(
        session.dispatch(Command::Join { name: "late".into() }),
        Err(DomainError::Phase(_))
    ));
    assert!(session.build_table(MemorySink::new()).is_err());

    let snapshot = session.snapshot(ana).unwrap();
    assert!(snapshot.started);
    assert!(snapshot.prompt.is_none());
}

#[test]
fn commands_use_a_tagged_json_shape() {
    let command: Command = serde_json::from_str(r#"{"command":"join","name":"ana"}"#).unwrap();
    assert_eq!(command, Command::Join { name: "ana".into() });

    let cancel: Command = serde_json::from_str(r#"{"command":"cancel"}"#).unwrap();
    assert_eq!(cancel, Command::Cancel);

    let json = serde_json::to_value(Reply::Accepted).unwrap();
    assert_eq!(json["reply"], "accepted");
}

#[test]
fn cancel_reaches_the_mailbox() {
    let session = session(2);
    assert_eq!(session.dispatch(Command::Cancel).unwrap(), Reply::Cancelled);
    assert!(session.is_cancelled());
    assert!(session.mailbox().is_cancelled());
}
