//! Game lifecycle outside of rounds: dealing, opening, cancelling, closing.

use tracing::{debug, info, warn};

use super::deck::deal_hands;
use super::round::begin_round;
use super::state::{GameState, Phase, Seat};
use crate::errors::domain::DomainError;

/// What dealing left the table waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealOutcome {
    /// The previous game's exchange must run first.
    ExchangePending,
    /// First round open at this seat.
    RoundOpened(Seat),
}

/// Deal a new game. `seed` shuffles the deck; `None` deals it in generation order.
pub fn start_game(state: &mut GameState, seed: Option<u64>) -> Result<DealOutcome, DomainError> {
    if !matches!(state.phase, Phase::NotStarted | Phase::GameEnded) {
        return Err(DomainError::phase(format!(
            "cannot deal in {:?}",
            state.phase
        )));
    }
    for p in &mut state.players {
        p.reset_for_game();
    }
    state.pile.drain();
    state.history.clear();
    state.unresolved.clear();
    state.order.reset();
    state.revolutions = 0;
    state.round_no = 0;
    state.turn = None;
    state.game_no += 1;
    state.phase = Phase::Distributing;

    let hands = deal_hands(&state.rules.deck, state.player_count(), seed)?;
    for (player, hand) in state.players.iter_mut().zip(hands) {
        player.give_cards(hand);
    }
    state.check_conservation()?;
    info!(
        game_no = state.game_no,
        players = state.player_count(),
        ?seed,
        "cards dealt"
    );

    if !state.exchange.plan.is_empty() {
        state.exchange.next = 0;
        state.exchange.tribute = None;
        state.phase = Phase::Exchanging;
        return Ok(DealOutcome::ExchangePending);
    }
    begin_first_round(state).map(DealOutcome::RoundOpened)
}

/// Reset the ladder and open the first round of the current game.
pub(crate) fn begin_first_round(state: &mut GameState) -> Result<Seat, DomainError> {
    state.winners.clear();
    state.losers.clear();
    let start = opening_seat(state);
    begin_round(state, start);
    Ok(start)
}

fn opening_seat(state: &GameState) -> Seat {
    if state.game_no == 1 && state.rules.queen_starts_first {
        match state.rules.starting_card() {
            Ok(card) => {
                if let Some(p) = state.players.iter().find(|p| p.holds(card)) {
                    debug!(seat = p.seat, "starting card holder opens");
                    return p.seat;
                }
                debug!("starting card not dealt, seat 0 opens");
            }
            Err(err) => warn!(error = %err, "starting card not in deck, seat 0 opens"),
        }
        return 0;
    }
    state.next_start.unwrap_or(0)
}

/// Park every card in hands and on the pile as unresolved. Never fails.
pub fn cancel(state: &mut GameState) {
    if state.phase.is_closed() {
        return;
    }
    let mut parked = Vec::new();
    for p in &mut state.players {
        parked.extend(p.drain_hand());
    }
    for play in state.pile.drain() {
        parked.extend(play.cards);
    }
    let count = parked.len();
    state.unresolved.extend(parked);
    state.turn = None;
    state.phase = Phase::Cancelled;
    warn!(game_no = state.game_no, parked = count, "game cancelled");
}

/// Close the session after a finished game (or before any).
pub fn close(state: &mut GameState) -> Result<(), DomainError> {
    match state.phase {
        Phase::GameEnded | Phase::NotStarted => {
            state.phase = Phase::Terminal;
            Ok(())
        }
        other => Err(DomainError::phase(format!("cannot close in {other:?}"))),
    }
}
