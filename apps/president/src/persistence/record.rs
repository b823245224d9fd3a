use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::domain::{GameState, GameSummary, Title};

/// One ladder position as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRecord {
    pub player: String,
    /// 1-based ladder position.
    pub rank: u8,
    /// Round in which the player went out.
    pub round: u32,
    /// `None` for players still holding cards when the game closed.
    pub last_card: Option<String>,
    pub grade: Title,
}

/// Append-only record of a completed game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub game_name: String,
    pub game_no: u32,
    /// RFC 3339, UTC.
    pub recorded_at: String,
    pub players: Vec<String>,
    pub winners: Vec<StandingRecord>,
    /// Cards laid per round, in order.
    pub plays: Vec<Vec<String>>,
}

impl GameRecord {
    pub fn from_game(state: &GameState, game_name: &str, summary: &GameSummary) -> Self {
        let deck = &state.rules.deck;
        let ladder = state.ladder();
        let winners = summary
            .standings
            .iter()
            .map(|standing| {
                let entry = ladder.iter().find(|e| e.seat == standing.seat);
                StandingRecord {
                    player: state
                        .players
                        .get(standing.seat as usize)
                        .map(|p| p.name.clone())
                        .unwrap_or_default(),
                    rank: standing.position,
                    round: entry.map_or(summary.rounds, |e| e.round_no),
                    last_card: entry.and_then(|e| e.last_card).map(|c| deck.format_card(c)),
                    grade: standing.title,
                }
            })
            .collect();
        let plays = state
            .history
            .iter()
            .map(|round| {
                round
                    .iter()
                    .flat_map(|play| deck.format_cards(&play.cards))
                    .collect()
            })
            .collect();
        Self {
            game_name: game_name.to_string(),
            game_no: summary.game_no,
            recorded_at: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string()),
            players: state.players.iter().map(|p| p.name.clone()).collect(),
            winners,
            plays,
        }
    }

    pub fn president(&self) -> Option<&str> {
        self.winners.first().map(|w| w.player.as_str())
    }
}
