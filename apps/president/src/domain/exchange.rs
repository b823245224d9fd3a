//! Post-game card exchange between ladder positions.
//!
//! The owing side's strongest cards move automatically; the receiving side
//! then picks the same number of cards to send back.

use tracing::{debug, info};

use super::cards_logic::strongest_cards;
use super::cards_types::Card;
use super::lifecycle::begin_first_round;
use super::state::{ExchangePair, GameState, Phase, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

/// Pair ladder position `i` with `n-1-i`, weighted by the advantage table.
pub fn plan_exchange(ladder: &[Seat], advantages: &[i8]) -> Vec<ExchangePair> {
    let n = ladder.len().min(advantages.len());
    (0..n / 2)
        .filter_map(|pos| {
            let count = advantages[n - 1 - pos];
            (count > 0).then(|| ExchangePair {
                debtor: ladder[n - 1 - pos],
                creditor: ladder[pos],
                count: count as usize,
            })
        })
        .collect()
}

/// The pair being processed, if the exchange is still running.
pub fn current(state: &GameState) -> Option<ExchangePair> {
    if state.phase != Phase::Exchanging {
        return None;
    }
    state.exchange.plan.get(state.exchange.next).copied()
}

fn require_current(state: &GameState) -> Result<ExchangePair, DomainError> {
    current(state).ok_or_else(|| DomainError::phase(format!("no exchange pending ({:?})", state.phase)))
}

/// Move the debtor's strongest cards to the creditor. Returns the moved cards.
pub fn pay_tribute(state: &mut GameState) -> Result<Vec<Card>, DomainError> {
    let pair = require_current(state)?;
    if state.exchange.tribute.is_some() {
        return Err(DomainError::phase("tribute already paid for this pair"));
    }
    let order = state.order;
    let debtor = state.player_mut(pair.debtor)?;
    let cards = strongest_cards(debtor.hand(), pair.count, &order);
    if let Err(missing) = debtor.take_cards(&cards) {
        return Err(DomainError::phase(format!(
            "tribute card #{} vanished from seat {}",
            missing.rank.0, pair.debtor
        )));
    }
    state.player_mut(pair.creditor)?.give_cards(cards.iter().copied());
    state.exchange.tribute = Some(cards.len());
    debug!(
        from = pair.debtor,
        to = pair.creditor,
        count = cards.len(),
        "tribute paid"
    );
    Ok(cards)
}

/// The creditor's cards going back to the debtor.
///
/// Closes the exchange (and opens the first round) after the last pair.
pub fn return_gift(state: &mut GameState, seat: Seat, cards: &[Card]) -> Result<(), DomainError> {
    let pair = require_current(state)?;
    let Some(expected) = state.exchange.tribute else {
        return Err(DomainError::phase("tribute not paid yet"));
    };
    if seat != pair.creditor {
        return Err(DomainError::illegal(
            ValidationKind::OutOfTurn,
            format!("seat {} gives back, not seat {seat}", pair.creditor),
        ));
    }
    if cards.len() != expected {
        return Err(DomainError::illegal(
            ValidationKind::WrongGiftSize,
            format!("expected {expected} cards, got {}", cards.len()),
        ));
    }
    if let Err(missing) = state.player_mut(seat)?.take_cards(cards) {
        let label = state.rules.deck.format_card(missing);
        tracing::error!(seat, card = %label, "gift card not in hand");
        state.phase = Phase::Aborted;
        return Err(DomainError::cheater(seat, format!("{label} is not in hand")));
    }
    state.player_mut(pair.debtor)?.give_cards(cards.iter().copied());
    state.exchange.next += 1;
    state.exchange.tribute = None;
    debug!(from = seat, to = pair.debtor, count = cards.len(), "gift returned");

    if state.exchange.next >= state.exchange.plan.len() {
        state.exchange.plan.clear();
        state.exchange.next = 0;
        state.check_conservation()?;
        info!(game_no = state.game_no, "exchange complete");
        begin_first_round(state)?;
    }
    Ok(())
}
