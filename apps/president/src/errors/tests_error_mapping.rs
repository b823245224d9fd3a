use super::domain::{DomainError, ValidationKind};

#[test]
fn only_illegal_moves_are_recoverable() {
    let illegal = DomainError::illegal(ValidationKind::TooWeak, "5 on a king");
    assert!(illegal.is_recoverable());
    assert_eq!(illegal.validation_kind(), Some(ValidationKind::TooWeak));

    let fatal = [
        DomainError::cheater(2, "card not in hand"),
        DomainError::invalid_card("Z,hearts"),
        DomainError::phase("round not in progress"),
        DomainError::config("bad rules"),
        DomainError::persistence("disk full"),
        DomainError::InvalidComparison("rank 40".into()),
        DomainError::PlayerNotFound("seat 9".into()),
        DomainError::Conflict("table full".into()),
    ];
    for err in fatal {
        assert!(!err.is_recoverable(), "{err} should not be recoverable");
        assert_eq!(err.validation_kind(), None);
    }
}

#[test]
fn display_carries_detail() {
    let err = DomainError::cheater(1, "played 2 of spades twice");
    assert_eq!(
        err.to_string(),
        "cheater detected at seat 1: played 2 of spades twice"
    );
    let err = DomainError::illegal(ValidationKind::WrongCount, "expected 2, got 1");
    assert!(err.to_string().contains("expected 2, got 1"));
}

#[test]
fn announcements_match_table_texts() {
    assert_eq!(ValidationKind::WrongCount.announcement(), "not enough cards");
    assert_eq!(
        ValidationKind::TooWeak.announcement(),
        "card not powerful enough"
    );
}
