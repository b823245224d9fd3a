//! Result store: one record per completed game.

mod record;
mod sink;

pub use record::{GameRecord, StandingRecord};
pub use sink::{JsonlFileSink, MemorySink, NullSink, ResultSink, SinkError};
