use std::collections::HashSet;

use tracing::debug;

use super::announcer::{Announcer, TracingAnnouncer};
use super::cancel::CancelToken;
use super::driver::Table;
use super::replay::{NoReplay, Replay};
use crate::ai::registry::default_ai;
use crate::ai::{generate_name, AiConfig, PlayStrategy};
use crate::config::SessionConfig;
use crate::domain::{derive_ai_seed, GameState, PlayerKind, PlayerToken, RuleSet};
use crate::errors::domain::DomainError;
use crate::persistence::{NullSink, ResultSink};

/// One seat to be created.
pub struct Seating {
    pub name: String,
    pub kind: PlayerKind,
    /// Keep an identity issued earlier (e.g. at join time).
    pub token: Option<PlayerToken>,
    pub strategy: Box<dyn PlayStrategy>,
}

pub struct TableBuilder {
    rules: RuleSet,
    config: SessionConfig,
    seats: Vec<Seating>,
    announcer: Box<dyn Announcer>,
    sink: Box<dyn ResultSink>,
    replay: Box<dyn Replay>,
    cancel: CancelToken,
}

impl TableBuilder {
    pub fn new(rules: RuleSet, config: SessionConfig) -> Self {
        Self {
            rules,
            config,
            seats: Vec::new(),
            announcer: Box::new(TracingAnnouncer),
            sink: Box::new(NullSink),
            replay: Box::new(NoReplay),
            cancel: CancelToken::new(),
        }
    }

    pub fn seat(mut self, seating: Seating) -> Self {
        self.seats.push(seating);
        self
    }

    pub fn human(self, name: impl Into<String>, strategy: Box<dyn PlayStrategy>) -> Self {
        self.seat(Seating {
            name: name.into(),
            kind: PlayerKind::Human,
            token: None,
            strategy,
        })
    }

    pub fn ai(self, name: impl Into<String>, strategy: Box<dyn PlayStrategy>) -> Self {
        self.seat(Seating {
            name: name.into(),
            kind: PlayerKind::Ai,
            token: None,
            strategy,
        })
    }

    /// Add default AI players until `seats` seats are taken.
    ///
    /// With a session seed, names and strategies are derived per seat.
    pub fn fill_with_ai(mut self, seats: usize) -> Self {
        let mut taken: HashSet<String> = self.seats.iter().map(|s| s.name.clone()).collect();
        for seat in self.seats.len()..seats {
            let seed = self.config.seed.map(|s| derive_ai_seed(s, seat as u8));
            let mut name = generate_name(seed);
            if taken.contains(&name) {
                name = format!("{name} #{}", seat + 1);
            }
            taken.insert(name.clone());
            let config = AiConfig {
                seed,
                name: Some(name.clone()),
                ..AiConfig::default()
            };
            debug!(seat, %name, ai = default_ai().name, "AI seated");
            let strategy = (default_ai().make)(config);
            self = self.ai(name, strategy);
        }
        self
    }

    pub fn announcer(mut self, announcer: impl Announcer + 'static) -> Self {
        self.announcer = Box::new(announcer);
        self
    }

    pub fn sink(mut self, sink: impl ResultSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn replay(mut self, replay: impl Replay + 'static) -> Self {
        self.replay = Box::new(replay);
        self
    }

    pub fn cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn build(self) -> Result<Table, DomainError> {
        let mut strategies = Vec::with_capacity(self.seats.len());
        let mut tokens = Vec::with_capacity(self.seats.len());
        let mut seats = Vec::with_capacity(self.seats.len());
        for seating in self.seats {
            seats.push((seating.name, seating.kind));
            tokens.push(seating.token);
            strategies.push(seating.strategy);
        }
        let mut state = GameState::new(self.rules, seats)?;
        for (player, token) in state.players.iter_mut().zip(tokens) {
            if let Some(token) = token {
                player.token = token;
            }
        }
        Ok(Table::new(
            state,
            strategies,
            self.announcer,
            self.sink,
            self.replay,
            self.config,
            self.cancel,
        ))
    }
}
