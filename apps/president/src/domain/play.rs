//! Move validation and application during a round.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::cards_logic::{common_rank, first_missing};
use super::cards_types::Card;
use super::player::Finish;
use super::round::{end_round, should_end, RoundSummary};
use super::state::{GameState, LadderEntry, Phase, Seat};
use super::turns::Turn;
use crate::errors::domain::{DomainError, ValidationKind};

/// A player's answer when given the turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Play(Vec<Card>),
    Fold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    Played(Vec<Card>),
    /// Out for the rest of the round.
    Folded,
    /// Out for this cycle only.
    Passed,
}

/// Result of a move, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub seat: Seat,
    pub kind: MoveKind,
    /// The value order flipped.
    pub revolution: bool,
    pub skipped: Option<Seat>,
    pub finished: Option<Finish>,
    /// Present when the move closed the round.
    pub round_ended: Option<RoundSummary>,
}

impl MoveOutcome {
    fn new(seat: Seat, kind: MoveKind) -> Self {
        Self {
            seat,
            kind,
            revolution: false,
            skipped: None,
            finished: None,
            round_ended: None,
        }
    }
}

/// Mark the table aborted and hand the error back for propagation.
fn abort(state: &mut GameState, err: DomainError) -> DomainError {
    error!(game_no = state.game_no, round_no = state.round_no, error = %err, "game aborted");
    state.phase = Phase::Aborted;
    state.turn = None;
    err
}

/// Checks that do not depend on the cards: phase, seat and turn.
fn check_actor(state: &mut GameState, seat: Seat) -> Result<(), DomainError> {
    if state.phase != Phase::RoundInProgress {
        return Err(DomainError::phase(format!(
            "no round in progress ({:?})",
            state.phase
        )));
    }
    if state.player(seat)?.is_finished() {
        return Err(abort(
            state,
            DomainError::cheater(seat, "finished player tried to act"),
        ));
    }
    if state.turn != Some(seat) {
        return Err(DomainError::illegal(
            ValidationKind::OutOfTurn,
            format!("seat {seat} acted while waiting on {:?}", state.turn),
        ));
    }
    Ok(())
}

/// Validate `cards` as a combination for `seat` without touching the state.
///
/// Ownership is not checked here.
pub fn validate_combination(
    state: &GameState,
    seat: Seat,
    cards: &[Card],
) -> Result<(), DomainError> {
    if cards.is_empty() {
        return Err(DomainError::illegal(ValidationKind::EmptyPlay, "no cards"));
    }
    match state.required_count {
        Some(required) if cards.len() != required => {
            return Err(DomainError::illegal(
                ValidationKind::WrongCount,
                format!("expected {required} cards, got {}", cards.len()),
            ));
        }
        None if cards.len() > state.rules.deck.suit_count() => {
            return Err(DomainError::illegal(
                ValidationKind::WrongCount,
                format!("{} cards cannot share one rank", cards.len()),
            ));
        }
        _ => {}
    }
    let rank = common_rank(cards).ok_or_else(|| {
        DomainError::illegal(ValidationKind::MixedRanks, "cards of different ranks")
    })?;
    if let Some(top) = state.pile.top().and_then(|p| p.cards.first()) {
        if !state.order.can_cover(rank, top.rank)? {
            return Err(DomainError::illegal(
                ValidationKind::TooWeak,
                format!("rank #{} does not cover rank #{}", rank.0, top.rank.0),
            ));
        }
    }
    let player = state.player(seat)?;
    let finishes = player.hand_len() == cards.len();
    if finishes
        && rank == state.order.strongest()
        && state.rules.best_card_loses
        && state.rules.loser_can_continue
    {
        return Err(DomainError::illegal(
            ValidationKind::FinishOnBestCard,
            "keep playing; the best card cannot close a hand",
        ));
    }
    Ok(())
}

/// Apply `mv` for `seat`, enforcing phase, turn, ownership and legality.
///
/// Illegal moves leave the state untouched. Cheating aborts the game.
pub fn apply_move(state: &mut GameState, seat: Seat, mv: Move) -> Result<MoveOutcome, DomainError> {
    check_actor(state, seat)?;
    match mv {
        Move::Fold => fold(state, seat),
        Move::Play(cards) => play_cards(state, seat, cards),
    }
}

fn fold(state: &mut GameState, seat: Seat) -> Result<MoveOutcome, DomainError> {
    let pass_only = state.rules.fold_counts_as_played;
    let player = state.player_mut(seat)?;
    let kind = if pass_only {
        player.played = true;
        MoveKind::Passed
    } else {
        player.folded = true;
        MoveKind::Folded
    };
    if pass_only {
        state.passed.insert(seat);
    }
    state.turn = None;
    debug!(seat, ?kind, "fold");

    let mut outcome = MoveOutcome::new(seat, kind);
    if should_end(state) {
        outcome.round_ended = Some(end_round(state)?);
    }
    Ok(outcome)
}

fn play_cards(
    state: &mut GameState,
    seat: Seat,
    cards: Vec<Card>,
) -> Result<MoveOutcome, DomainError> {
    if let Some(missing) = first_missing(state.player(seat)?.hand(), &cards) {
        let label = state.rules.deck.format_card(missing);
        return Err(abort(
            state,
            DomainError::cheater(seat, format!("{label} is not in hand")),
        ));
    }
    validate_combination(state, seat, &cards)?;

    let rank = cards[0].rank;
    let is_best = rank == state.order.strongest();
    let suit_count = state.rules.deck.suit_count();
    let count = cards.len();

    {
        let player = state.player_mut(seat)?;
        if let Err(missing) = player.take_cards(&cards) {
            let label = state.rules.deck.format_card(missing);
            return Err(abort(
                state,
                DomainError::cheater(seat, format!("{label} is not in hand")),
            ));
        }
        player.played = true;
    }
    state.pile.push(seat, cards.clone());
    state.required_count.get_or_insert(count);
    state.last_player = Some(seat);
    state.passed.clear();
    state.turn = None;

    let mut outcome = MoveOutcome::new(seat, MoveKind::Played(cards.clone()));

    if state.rules.revolution && count == suit_count {
        state.order.reverse();
        state.revolutions += 1;
        outcome.revolution = true;
        info!(seat, reversed = state.order.is_reversed(), "revolution");
    }

    if state.rules.skip_next_on_repeat
        && state
            .pile
            .previous()
            .and_then(|p| p.cards.first())
            .is_some_and(|c| c.rank == rank)
    {
        if let Turn::Active(target) = state.cursor.peek(&state.players) {
            if target != seat {
                state.players[target as usize].played = true;
                state.passed.insert(target);
                outcome.skipped = Some(target);
                debug!(seat, target, "repeat skips next player");
            }
        }
    }

    if state.player(seat)?.hand_len() == 0 {
        let finish = if is_best && state.rules.best_card_loses {
            Finish::Lost
        } else {
            Finish::Won
        };
        let entry = LadderEntry {
            seat,
            round_no: state.round_no,
            last_card: cards.last().copied(),
            finish,
        };
        match finish {
            Finish::Won => state.winners.push(entry),
            Finish::Lost => state.losers.push(entry),
        }
        state.player_mut(seat)?.finish = Some(finish);
        outcome.finished = Some(finish);
        info!(seat, ?finish, round_no = state.round_no, "player finished");
    }

    let ends_round = state.unfinished_count() <= 1
        || (is_best && state.rules.best_card_ends_round)
        || should_end(state);
    if ends_round {
        outcome.round_ended = Some(end_round(state)?);
    }
    Ok(outcome)
}

/// Every combination `seat` could lay right now, weakest rank first.
pub fn legal_combinations(state: &GameState, seat: Seat) -> Vec<Vec<Card>> {
    let Ok(player) = state.player(seat) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for rank in state.order.ranks_weakest_first() {
        let group: Vec<Card> = player
            .hand()
            .iter()
            .filter(|c| c.rank == rank)
            .copied()
            .collect();
        let sizes: Vec<usize> = match state.required_count {
            Some(r) => vec![r],
            None => (1..=group.len()).collect(),
        };
        for size in sizes {
            if size == 0 || size > group.len() {
                continue;
            }
            let combo = group[..size].to_vec();
            if validate_combination(state, seat, &combo).is_ok() {
                out.push(combo);
            }
        }
    }
    out
}
