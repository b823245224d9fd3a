//! Round lifecycle: opening, turn hand-off, cycle resets and closing.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::ladder::{finish_game, GameSummary};
use super::state::{GameState, Phase, Seat};
use super::turns::{first_unfinished_from, next_seat, Turn, TurnCursor};
use crate::errors::domain::DomainError;

/// What a closed round looked like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_no: u32,
    /// Seat that laid the last combination, if anyone played.
    pub taken_by: Option<Seat>,
    pub cards: usize,
    /// Seat opening the next round.
    pub next_start: Option<Seat>,
    /// Present when this round also closed the game.
    pub game: Option<GameSummary>,
}

pub(crate) fn begin_round(state: &mut GameState, start: Seat) {
    state.round_no += 1;
    state.round_start = start;
    state.cursor = TurnCursor::new(start);
    state.turn = None;
    state.required_count = None;
    state.last_player = None;
    state.passed.clear();
    for p in &mut state.players {
        p.reset_round_flags();
    }
    state.phase = Phase::RoundInProgress;
    debug!(
        game_no = state.game_no,
        round_no = state.round_no,
        start,
        "round started"
    );
}

/// Hand the turn to the next eligible seat.
pub fn next_turn(state: &mut GameState) -> Turn {
    if state.phase != Phase::RoundInProgress {
        return Turn::RoundOver;
    }
    let turn = state.cursor.next(&state.players);
    state.turn = match turn {
        Turn::Active(seat) => Some(seat),
        _ => None,
    };
    turn
}

/// Start a new cycle after `Turn::Paused`. False when nobody can act any more.
pub fn begin_cycle(state: &mut GameState) -> bool {
    for p in &mut state.players {
        p.played = false;
    }
    let any = state.players.iter().any(|p| p.is_eligible());
    debug!(round_no = state.round_no, any, "new cycle");
    any
}

/// True when nobody but the top combination's owner is still contesting.
pub fn should_end(state: &GameState) -> bool {
    !state.players.iter().any(|p| {
        p.is_live() && Some(p.seat) != state.last_player && !state.passed.contains(&p.seat)
    })
}

/// Archive the pile and move to `RoundEnded`, or to `GameEnded` when at most
/// one player is left holding cards.
pub fn end_round(state: &mut GameState) -> Result<RoundSummary, DomainError> {
    if state.phase != Phase::RoundInProgress {
        return Err(DomainError::phase(format!(
            "cannot end a round in {:?}",
            state.phase
        )));
    }
    let plays = state.pile.drain();
    let cards = plays.iter().map(|p| p.cards.len()).sum();
    state.history.push(plays);
    state.turn = None;

    let from = match state.last_player {
        Some(seat) => seat,
        None => next_seat(state.round_start, state.player_count()),
    };
    state.next_start = first_unfinished_from(&state.players, from);

    let mut summary = RoundSummary {
        round_no: state.round_no,
        taken_by: state.last_player,
        cards,
        next_start: state.next_start,
        game: None,
    };
    if state.unfinished_count() <= 1 || is_stalled(state) {
        let game = finish_game(state)?;
        summary.next_start = state.next_start;
        summary.game = Some(game);
    } else {
        state.phase = Phase::RoundEnded;
        info!(
            round_no = summary.round_no,
            taken_by = ?summary.taken_by,
            cards,
            "round ended"
        );
    }
    state.check_conservation()?;
    Ok(summary)
}

/// Nobody played and every remaining hand holds only the strongest rank,
/// which the finishing rule forbids laying last.
fn is_stalled(state: &GameState) -> bool {
    let rules = &state.rules;
    if !(rules.best_card_loses && rules.loser_can_continue) || state.last_player.is_some() {
        return false;
    }
    let strongest = state.order.strongest();
    state
        .players
        .iter()
        .filter(|p| !p.is_finished())
        .all(|p| p.hand().iter().all(|c| c.rank == strongest))
}

/// Open the round that follows a `RoundEnded`.
pub fn start_next_round(state: &mut GameState) -> Result<Seat, DomainError> {
    if state.phase != Phase::RoundEnded {
        return Err(DomainError::phase(format!(
            "cannot start a round in {:?}",
            state.phase
        )));
    }
    let start = state
        .next_start
        .and_then(|s| first_unfinished_from(&state.players, s))
        .ok_or_else(|| DomainError::phase("no unfinished player to open the round"))?;
    begin_round(state, start);
    Ok(start)
}
