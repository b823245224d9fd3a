//! The game loop.
//!
//! The table owns the state and is the only caller of the engine's mutating
//! operations during a session. Refused moves are announced and asked again;
//! only cheating, lookup failures and persistence errors escape.

use rand::Rng;
use tracing::{info, warn};

use super::announcer::Announcer;
use super::builder::TableBuilder;
use super::cancel::CancelToken;
use super::replay::Replay;
use crate::ai::{AiError, GiftRequest, PlayRequest, PlayStrategy};
use crate::config::SessionConfig;
use crate::domain::exchange::{current, pay_tribute, return_gift};
use crate::domain::{
    apply_move, begin_cycle, cancel, close, derive_dealing_seed, end_round, next_turn,
    start_game, start_next_round, weakest_cards, Card, DealOutcome, GameEvent, GameState,
    GameSummary, Move, MoveKind, MoveOutcome, Phase, Player, RoundSummary, RuleSet, Seat, Turn,
};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::persistence::{GameRecord, ResultSink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    Finished(GameSummary),
    Cancelled,
}

/// Games completed in one `run_session`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub games: Vec<GameSummary>,
    pub cancelled: bool,
}

pub struct Table {
    state: GameState,
    strategies: Vec<Box<dyn PlayStrategy>>,
    announcer: Box<dyn Announcer>,
    sink: Box<dyn ResultSink>,
    replay: Box<dyn Replay>,
    config: SessionConfig,
    cancel: CancelToken,
    games_played: u32,
}

impl Table {
    pub fn builder(rules: RuleSet, config: SessionConfig) -> TableBuilder {
        TableBuilder::new(rules, config)
    }

    pub(super) fn new(
        state: GameState,
        strategies: Vec<Box<dyn PlayStrategy>>,
        announcer: Box<dyn Announcer>,
        sink: Box<dyn ResultSink>,
        replay: Box<dyn Replay>,
        config: SessionConfig,
        cancel: CancelToken,
    ) -> Self {
        Self {
            state,
            strategies,
            announcer,
            sink,
            replay,
            config,
            cancel,
            games_played: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Play games until the budget or the replay policy says stop, then close.
    pub fn run_session(&mut self) -> Result<SessionReport, DomainError> {
        let mut report = SessionReport::default();
        loop {
            if let Some(budget) = self.config.max_games {
                if self.games_played >= budget {
                    break;
                }
            }
            match self.play_game()? {
                GameOutcome::Finished(summary) => report.games.push(summary),
                GameOutcome::Cancelled => {
                    report.cancelled = true;
                    break;
                }
            }
            if self.config.max_games.is_none() && !self.replay.play_another(self.games_played) {
                break;
            }
        }
        if self.state.phase == Phase::GameEnded {
            close(&mut self.state)?;
        }
        info!(
            games = report.games.len(),
            cancelled = report.cancelled,
            "session over"
        );
        Ok(report)
    }

    /// Deal, run the exchange if one is due, and play rounds until the game ends.
    ///
    /// Saves exactly one record when the game completes.
    pub fn play_game(&mut self) -> Result<GameOutcome, DomainError> {
        let seed = self.deal_seed();
        let dealt = start_game(&mut self.state, seed)?;
        self.announce(GameEvent::GameStarted {
            game_no: self.state.game_no,
            hand_sizes: self.state.players.iter().map(Player::hand_len).collect(),
        });
        if dealt == DealOutcome::ExchangePending && !self.run_exchange()? {
            return Ok(self.cancelled());
        }
        self.announce_round_start();

        let summary = loop {
            if self.cancel.is_cancelled() {
                return Ok(self.cancelled());
            }
            let ended = match next_turn(&mut self.state) {
                Turn::Active(seat) => self.take_turn(seat)?,
                Turn::Paused if begin_cycle(&mut self.state) => continue,
                Turn::Paused | Turn::RoundOver => {
                    let round = end_round(&mut self.state)?;
                    self.note_round_end(round)
                }
            };
            if let Some(game) = ended {
                break game;
            }
            if self.state.phase == Phase::RoundEnded {
                start_next_round(&mut self.state)?;
                self.announce_round_start();
            }
        };

        self.games_played += 1;
        let record = GameRecord::from_game(&self.state, &self.config.game_name, &summary);
        self.sink.save_game(&record)?;
        self.announce(GameEvent::GameEnded {
            summary: summary.clone(),
        });
        Ok(GameOutcome::Finished(summary))
    }

    fn deal_seed(&self) -> Option<u64> {
        if !self.config.shuffle {
            return None;
        }
        let game_no = self.state.game_no + 1;
        Some(match self.config.seed {
            Some(seed) => derive_dealing_seed(seed, game_no),
            None => rand::rng().random(),
        })
    }

    fn announce(&mut self, event: GameEvent) {
        self.announcer.announce(&event);
    }

    fn announce_round_start(&mut self) {
        self.announce(GameEvent::RoundStarted {
            round_no: self.state.round_no,
            start: self.state.round_start,
        });
    }

    fn cancelled(&mut self) -> GameOutcome {
        cancel(&mut self.state);
        self.announce(GameEvent::Cancelled);
        GameOutcome::Cancelled
    }

    /// Announce a fatal error if it aborted the game, and hand it back.
    fn fail(&mut self, err: DomainError) -> DomainError {
        if self.state.phase == Phase::Aborted {
            self.announce(GameEvent::Aborted {
                reason: err.to_string(),
            });
        }
        err
    }

    fn refused(&mut self, seat: Seat, attempt: u32, err: &DomainError) -> String {
        let reason = err
            .validation_kind()
            .map_or("illegal move", ValidationKind::announcement)
            .to_string();
        warn!(seat, attempt, error = %err, "move refused");
        self.announce(GameEvent::Rejected {
            seat,
            reason: reason.clone(),
        });
        reason
    }

    /// Ask `seat` until the engine accepts an answer. Returns the game summary
    /// when the move ended the game.
    fn take_turn(&mut self, seat: Seat) -> Result<Option<GameSummary>, DomainError> {
        self.announce(GameEvent::TurnBecame { seat });
        let mut attempt = 0;
        let mut rejection: Option<String> = None;
        loop {
            let mv = if attempt >= self.config.max_attempts {
                warn!(seat, attempt, "too many refused answers, forcing a fold");
                Move::Fold
            } else {
                let decision = {
                    let mut request = PlayRequest::from_state(&self.state, seat)?;
                    request.attempt = attempt;
                    request.rejection = rejection.take();
                    let strategy = self
                        .strategies
                        .get_mut(seat as usize)
                        .ok_or_else(|| DomainError::PlayerNotFound(format!("seat {seat}")))?;
                    strategy.choose_move(&request)
                };
                match decision {
                    Ok(mv) => mv,
                    Err(AiError::Cancelled) => {
                        self.cancel.cancel();
                        return Ok(None);
                    }
                    Err(err) => {
                        warn!(seat, error = %err, "no usable answer, folding");
                        Move::Fold
                    }
                }
            };
            match apply_move(&mut self.state, seat, mv) {
                Ok(outcome) => return Ok(self.announce_outcome(outcome)),
                Err(err) if err.is_recoverable() && attempt < self.config.max_attempts => {
                    rejection = Some(self.refused(seat, attempt, &err));
                    attempt += 1;
                }
                Err(err) => return Err(self.fail(err)),
            }
        }
    }

    fn announce_outcome(&mut self, outcome: MoveOutcome) -> Option<GameSummary> {
        let seat = outcome.seat;
        self.announce(match outcome.kind {
            MoveKind::Played(cards) => GameEvent::CardsPlayed { seat, cards },
            MoveKind::Folded => GameEvent::Folded { seat },
            MoveKind::Passed => GameEvent::Passed { seat },
        });
        if outcome.revolution {
            self.announce(GameEvent::Revolution {
                active: self.state.revolution_active(),
            });
        }
        if let Some(target) = outcome.skipped {
            self.announce(GameEvent::Skipped { seat: target });
        }
        if let Some(finish) = outcome.finished {
            self.announce(GameEvent::PlayerFinished { seat, finish });
        }
        outcome.round_ended.and_then(|round| self.note_round_end(round))
    }

    fn note_round_end(&mut self, round: RoundSummary) -> Option<GameSummary> {
        self.announce(GameEvent::RoundEnded {
            round_no: round.round_no,
            taken_by: round.taken_by,
        });
        round.game
    }

    /// Run every pair of the exchange. False when cancelled midway.
    fn run_exchange(&mut self) -> Result<bool, DomainError> {
        while let Some(pair) = current(&self.state) {
            if self.cancel.is_cancelled() {
                return Ok(false);
            }
            let tribute = pay_tribute(&mut self.state)?;
            self.announce(GameEvent::TributePaid {
                from: pair.debtor,
                to: pair.creditor,
                count: tribute.len(),
            });
            let mut attempt = 0;
            let mut rejection: Option<String> = None;
            loop {
                let gift = if attempt >= self.config.max_attempts {
                    warn!(seat = pair.creditor, "too many refused gifts, giving the weakest");
                    self.weakest_gift(pair.creditor, tribute.len())?
                } else {
                    let decision = {
                        let mut request = GiftRequest::from_state(
                            &self.state,
                            pair.creditor,
                            pair.debtor,
                            tribute.len(),
                        )?;
                        request.attempt = attempt;
                        request.rejection = rejection.take();
                        let strategy = self.strategies.get_mut(pair.creditor as usize).ok_or_else(
                            || DomainError::PlayerNotFound(format!("seat {}", pair.creditor)),
                        )?;
                        strategy.choose_gift(&request)
                    };
                    match decision {
                        Ok(cards) => cards,
                        Err(AiError::Cancelled) => {
                            self.cancel.cancel();
                            return Ok(false);
                        }
                        Err(err) => {
                            warn!(seat = pair.creditor, error = %err, "no usable gift, giving the weakest");
                            self.weakest_gift(pair.creditor, tribute.len())?
                        }
                    }
                };
                let count = gift.len();
                match return_gift(&mut self.state, pair.creditor, &gift) {
                    Ok(()) => {
                        self.announce(GameEvent::GiftReturned {
                            from: pair.creditor,
                            to: pair.debtor,
                            count,
                        });
                        break;
                    }
                    Err(err) if err.is_recoverable() && attempt < self.config.max_attempts => {
                        rejection = Some(self.refused(pair.creditor, attempt, &err));
                        attempt += 1;
                    }
                    Err(err) => return Err(self.fail(err)),
                }
            }
        }
        Ok(true)
    }

    fn weakest_gift(&self, seat: Seat, count: usize) -> Result<Vec<Card>, DomainError> {
        let hand = self.state.player(seat)?.hand();
        Ok(weakest_cards(hand, count, &self.state.order))
    }
}
