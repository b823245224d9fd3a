//! Table driver: binds a game to one strategy per seat and runs sessions.

mod announcer;
mod builder;
mod cancel;
mod driver;
mod replay;

#[cfg(test)]
mod tests_driver;

pub use announcer::{Announcer, RecordingAnnouncer, TracingAnnouncer};
pub use builder::{Seating, TableBuilder};
pub use cancel::CancelToken;
pub use driver::{GameOutcome, SessionReport, Table};
pub use replay::{GameBudget, NoReplay, Replay};
