#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod errors;
pub mod persistence;
pub mod players;
pub mod session;
pub mod table;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use ai::{AiConfig, AiError, HeuristicAi, PlayStrategy, RandomPlayer};
pub use config::SessionConfig;
pub use domain::{Card, GameEvent, GameState, GameSummary, Move, Phase, RuleSet, Seat};
pub use errors::{DomainError, ValidationKind};
pub use persistence::{GameRecord, JsonlFileSink, MemorySink, ResultSink, SinkError};
pub use players::{HumanPrompt, MoveSource, RemotePrompt, Response};
pub use session::{Command, Reply, Session};
pub use table::{Announcer, CancelToken, GameBudget, GameOutcome, Replay, SessionReport, Table};
pub use telemetry::init_tracing;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
