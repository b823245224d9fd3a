use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use super::command::{Command, Reply, SeatSnapshot};
use crate::config::SessionConfig;
use crate::domain::{GameEvent, PlayerKind, PlayerToken, RuleSet, Seat};
use crate::errors::domain::DomainError;
use crate::persistence::ResultSink;
use crate::players::{Mailbox, RemotePrompt, Submission};
use crate::table::{Announcer, CancelToken, GameBudget, NoReplay, Seating, Table, TracingAnnouncer};

/// Events kept for snapshots.
const EVENT_LOG_LEN: usize = 64;

#[derive(Debug)]
struct Member {
    token: PlayerToken,
    name: String,
    departed: bool,
}

#[derive(Debug, Default)]
struct Roster {
    members: Vec<Member>,
    events: VecDeque<GameEvent>,
    started: bool,
}

impl Roster {
    fn seat_of(&self, token: PlayerToken) -> Result<Seat, DomainError> {
        self.members
            .iter()
            .position(|m| m.token == token)
            .map(|i| i as Seat)
            .ok_or_else(|| DomainError::PlayerNotFound(format!("token {token}")))
    }
}

pub struct Session {
    config: SessionConfig,
    rules: RuleSet,
    roster: Mutex<Roster>,
    mailbox: Arc<Mailbox>,
    cancel: CancelToken,
}

impl Session {
    pub fn new(rules: RuleSet, config: SessionConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            rules,
            roster: Mutex::new(Roster::default()),
            mailbox: Arc::new(Mailbox::new()),
            cancel: CancelToken::new(),
        })
    }

    pub fn dispatch(&self, command: Command) -> Result<Reply, DomainError> {
        match command {
            Command::Join { name } => self.join(name),
            Command::Submit { token, cards } => self.submit(token, cards),
            Command::Snapshot { token } => self.snapshot(token).map(Reply::Snapshot),
            Command::Leave { token } => self.leave(token),
            Command::Cancel => {
                self.cancel.cancel();
                self.mailbox.cancel();
                info!("session cancelled");
                Ok(Reply::Cancelled)
            }
        }
    }

    fn join(&self, name: String) -> Result<Reply, DomainError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::config("player name is empty"));
        }
        let mut roster = self.roster.lock();
        if roster.started {
            return Err(DomainError::phase("the game has already started"));
        }
        if roster.members.len() >= self.config.seats {
            return Err(DomainError::Conflict(format!(
                "table is full ({} seats)",
                self.config.seats
            )));
        }
        if roster.members.iter().any(|m| m.name == name) {
            return Err(DomainError::Conflict(format!("name {name:?} is taken")));
        }
        let token = PlayerToken::new();
        let seat = roster.members.len() as Seat;
        info!(%token, seat, %name, "player joined");
        roster.members.push(Member {
            token,
            name,
            departed: false,
        });
        Ok(Reply::Joined { token, seat })
    }

    fn submit(&self, token: PlayerToken, cards: Option<Vec<String>>) -> Result<Reply, DomainError> {
        let seat = {
            let roster = self.roster.lock();
            let seat = roster.seat_of(token)?;
            if roster.members[seat as usize].departed {
                return Err(DomainError::Conflict(format!("seat {seat} has left")));
            }
            seat
        };
        let submission = match cards {
            None => Submission::Fold,
            Some(tokens) => Submission::Cards(self.rules.deck.try_parse_cards(&tokens)?),
        };
        if !self.mailbox.submit(token, submission) {
            return Err(DomainError::Conflict(format!(
                "seat {seat} has no question to answer"
            )));
        }
        Ok(Reply::Accepted)
    }

    pub fn snapshot(&self, token: PlayerToken) -> Result<SeatSnapshot, DomainError> {
        let roster = self.roster.lock();
        let seat = roster.seat_of(token)?;
        Ok(SeatSnapshot {
            seat,
            name: roster.members[seat as usize].name.clone(),
            started: roster.started,
            prompt: self.mailbox.prompt_for(token),
            events: roster.events.iter().cloned().collect(),
        })
    }

    /// Before the start the seat is freed and later joiners move down one
    /// seat; afterwards it folds on every turn.
    fn leave(&self, token: PlayerToken) -> Result<Reply, DomainError> {
        let mut roster = self.roster.lock();
        let seat = roster.seat_of(token)?;
        if roster.started {
            roster.members[seat as usize].departed = true;
            self.mailbox.depart(token);
        } else {
            roster.members.remove(seat as usize);
        }
        info!(%token, seat, "player left");
        Ok(Reply::Left)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn mailbox(&self) -> &Arc<Mailbox> {
        &self.mailbox
    }

    /// Close the roster and seat everyone: joined players as remote seats,
    /// the rest filled with AI.
    pub fn build_table(
        self: &Arc<Self>,
        sink: impl ResultSink + 'static,
    ) -> Result<Table, DomainError> {
        let mut roster = self.roster.lock();
        if roster.started {
            return Err(DomainError::phase("the table is already built"));
        }
        let mut builder = Table::builder(self.rules.clone(), self.config.clone());
        for member in &roster.members {
            builder = builder.seat(Seating {
                name: member.name.clone(),
                kind: PlayerKind::Human,
                token: Some(member.token),
                strategy: Box::new(RemotePrompt::new(
                    member.token,
                    Arc::clone(&self.mailbox),
                    self.config.tick(),
                    self.config.retries,
                )),
            });
        }
        let announcers: Vec<Box<dyn Announcer>> = vec![
            Box::new(SessionAnnouncer(Arc::clone(self))),
            Box::new(TracingAnnouncer),
        ];
        let builder = builder
            .fill_with_ai(self.config.seats)
            .announcer(announcers)
            .sink(sink)
            .cancel_token(self.cancel.clone());
        let builder = match self.config.max_games {
            Some(budget) => builder.replay(GameBudget(budget)),
            None => builder.replay(NoReplay),
        };
        let table = builder.build()?;
        roster.started = true;
        info!(humans = roster.members.len(), seats = self.config.seats, "table built");
        Ok(table)
    }

    fn record(&self, event: &GameEvent) {
        let mut roster = self.roster.lock();
        if roster.events.len() == EVENT_LOG_LEN {
            roster.events.pop_front();
        }
        roster.events.push_back(event.clone());
    }
}

/// Feeds table events into the session's snapshot log.
pub struct SessionAnnouncer(Arc<Session>);

impl Announcer for SessionAnnouncer {
    fn announce(&mut self, event: &GameEvent) {
        self.0.record(event);
    }
}
