//! End-of-game ranking: ladder, titles, advantages and the exchange plan.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::exchange::plan_exchange;
use super::player::{Finish, RankAssignment};
use super::rules::Title;
use super::state::{GameState, LadderEntry, Phase, Seat};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub seat: Seat,
    pub position: u8,
    pub title: Title,
    pub advantage: i8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub game_no: u32,
    pub rounds: u32,
    pub revolutions: u32,
    pub standings: Vec<Standing>,
}

impl GameSummary {
    pub fn president(&self) -> Option<Seat> {
        self.standings.first().map(|s| s.seat)
    }

    pub fn troufion(&self) -> Option<Seat> {
        self.standings.last().map(|s| s.seat)
    }
}

/// Close the game: mark the remaining players as losers, rank everyone and
/// fix the exchange for the next game.
pub(crate) fn finish_game(state: &mut GameState) -> Result<GameSummary, DomainError> {
    let round_no = state.round_no;
    let game_no = state.game_no;
    let remaining: Vec<Seat> = state
        .players
        .iter()
        .filter(|p| !p.is_finished())
        .map(|p| p.seat)
        .collect();
    for seat in remaining {
        state.player_mut(seat)?.finish = Some(Finish::Lost);
        state.losers.push(LadderEntry {
            seat,
            round_no,
            last_card: None,
            finish: Finish::Lost,
        });
    }

    let ladder: Vec<Seat> = state.ladder().iter().map(|e| e.seat).collect();
    let n = ladder.len();
    let advantages = state.rules.advantages(n);
    let mut standings = Vec::with_capacity(n);
    for (pos, &seat) in ladder.iter().enumerate() {
        let standing = Standing {
            seat,
            position: (pos + 1) as u8,
            title: state.rules.title(pos, n),
            advantage: advantages[pos],
        };
        state.player_mut(seat)?.assign_rank(RankAssignment {
            game_no,
            position: standing.position,
            title: standing.title,
            advantage: standing.advantage,
        });
        standings.push(standing);
    }

    state.exchange.plan = plan_exchange(&ladder, &advantages);
    state.exchange.next = 0;
    state.exchange.tribute = None;
    // Everyone is dealt in again, so the next game opens where this one stopped.
    state.next_start = Some(state.last_player.unwrap_or(state.round_start));
    state.phase = Phase::GameEnded;

    let summary = GameSummary {
        game_no: state.game_no,
        rounds: state.round_no,
        revolutions: state.revolutions,
        standings,
    };
    info!(
        game_no = summary.game_no,
        rounds = summary.rounds,
        president = ?summary.president(),
        troufion = ?summary.troufion(),
        "game ended"
    );
    Ok(summary)
}
