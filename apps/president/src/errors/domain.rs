//! Domain-level error type used across the engine, table driver and session.
//!
//! Recoverable move problems (`IllegalMove`) are answered with a re-prompt;
//! everything else terminates the current game.

use thiserror::Error;

use crate::domain::state::Seat;

/// Why a submitted move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    EmptyPlay,
    WrongCount,
    MixedRanks,
    TooWeak,
    FinishOnBestCard,
    OutOfTurn,
    WrongGiftSize,
}

impl ValidationKind {
    /// Short text shown to the table when a move is refused.
    pub fn announcement(self) -> &'static str {
        match self {
            ValidationKind::EmptyPlay => "no cards given",
            ValidationKind::WrongCount => "not enough cards",
            ValidationKind::MixedRanks => "cards must share one rank",
            ValidationKind::TooWeak => "card not powerful enough",
            ValidationKind::FinishOnBestCard => "cannot finish on the best card",
            ValidationKind::OutOfTurn => "not your turn",
            ValidationKind::WrongGiftSize => "wrong number of cards to give",
        }
    }
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Unknown rank/suit, or a malformed card token.
    #[error("invalid card: {0}")]
    InvalidCard(String),
    /// A rank outside the active value order was compared.
    #[error("invalid comparison: {0}")]
    InvalidComparison(String),
    /// Move refused; the player is asked again.
    #[error("illegal move ({kind:?}): {detail}")]
    IllegalMove {
        kind: ValidationKind,
        detail: String,
    },
    /// Cards not owned, or a finished player acting. Aborts the game.
    #[error("cheater detected at seat {seat}: {detail}")]
    CheaterDetected { seat: Seat, detail: String },
    #[error("player not found: {0}")]
    PlayerNotFound(String),
    /// Operation not allowed in the current phase.
    #[error("phase mismatch: {0}")]
    Phase(String),
    /// Seat already taken, table full, duplicate names.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn illegal(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::IllegalMove {
            kind,
            detail: detail.into(),
        }
    }
    pub fn cheater(seat: Seat, detail: impl Into<String>) -> Self {
        Self::CheaterDetected {
            seat,
            detail: detail.into(),
        }
    }
    pub fn invalid_card(detail: impl Into<String>) -> Self {
        Self::InvalidCard(detail.into())
    }
    pub fn phase(detail: impl Into<String>) -> Self {
        Self::Phase(detail.into())
    }
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }
    pub fn persistence(detail: impl Into<String>) -> Self {
        Self::Persistence(detail.into())
    }

    /// True when the caller should simply ask the player again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DomainError::IllegalMove { .. })
    }

    /// Validation kind for recoverable errors.
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            DomainError::IllegalMove { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
