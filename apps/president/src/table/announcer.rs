//! Announcements of game events to whoever is watching.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::GameEvent;

pub trait Announcer: Send {
    fn announce(&mut self, event: &GameEvent);
}

/// Logs every event; the default announcer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnnouncer;

impl Announcer for TracingAnnouncer {
    fn announce(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameStarted { .. }
            | GameEvent::GameEnded { .. }
            | GameEvent::RoundEnded { .. }
            | GameEvent::Revolution { .. }
            | GameEvent::PlayerFinished { .. } => info!(?event, "announce"),
            GameEvent::Rejected { seat, reason } => {
                warn!(seat, reason = %reason, "announce: move refused")
            }
            GameEvent::Aborted { reason } => warn!(reason = %reason, "announce: game aborted"),
            _ => debug!(?event, "announce"),
        }
    }
}

/// Keeps events in memory; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnnouncer {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl RecordingAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|e| pred(e)).count()
    }
}

impl Announcer for RecordingAnnouncer {
    fn announce(&mut self, event: &GameEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Fan out to several announcers in order.
impl Announcer for Vec<Box<dyn Announcer>> {
    fn announce(&mut self, event: &GameEvent) {
        for announcer in self.iter_mut() {
            announcer.announce(event);
        }
    }
}
