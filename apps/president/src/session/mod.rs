//! Networked play: commands from clients, one table per session.
//!
//! Clients address their seat with the `PlayerToken` handed out at join time.
//! Every mutation goes through one lock; the table thread only reads the
//! mailbox and appends to the event log.

mod command;
mod service;

#[cfg(test)]
mod tests_session;

pub use command::{Command, Reply, SeatSnapshot};
pub use service::{Session, SessionAnnouncer};
