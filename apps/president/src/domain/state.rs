use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::cards_logic::ValueOrder;
use super::cards_types::Card;
use super::player::{Finish, Player, PlayerKind, PlayerToken};
use super::rules::RuleSet;
use super::turns::TurnCursor;
use crate::errors::domain::DomainError;

pub type Seat = u8;

/// Lifecycle of a table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Players seated, nothing dealt.
    NotStarted,
    /// Deck generated and being dealt.
    Distributing,
    /// Card exchange from the previous game's ladder.
    Exchanging,
    RoundInProgress,
    /// Pile archived; the next round has not begun.
    RoundEnded,
    /// Ladder and ranks assigned; a replay may follow.
    GameEnded,
    /// Session closed normally.
    Terminal,
    /// A cheater was detected.
    Aborted,
    /// Cancelled from outside; cards parked as unresolved.
    Cancelled,
}

impl Phase {
    /// No further moves will ever be accepted.
    pub fn is_closed(self) -> bool {
        matches!(self, Phase::Terminal | Phase::Aborted | Phase::Cancelled)
    }

    /// Cards are in hands or on the table.
    pub fn is_dealt(self) -> bool {
        matches!(
            self,
            Phase::Distributing
                | Phase::Exchanging
                | Phase::RoundInProgress
                | Phase::RoundEnded
                | Phase::GameEnded
        )
    }
}

/// One combination laid on the pile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub seat: Seat,
    pub cards: Vec<Card>,
}

/// The cards of the current round, in the order they were laid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pile {
    plays: Vec<Play>,
}

impl Pile {
    pub fn push(&mut self, seat: Seat, cards: Vec<Card>) {
        self.plays.push(Play { seat, cards });
    }

    pub fn top(&self) -> Option<&Play> {
        self.plays.last()
    }

    /// The combination laid before the top one.
    pub fn previous(&self) -> Option<&Play> {
        self.plays.len().checked_sub(2).map(|i| &self.plays[i])
    }

    pub fn owner(&self) -> Option<Seat> {
        self.top().map(|p| p.seat)
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn card_count(&self) -> usize {
        self.plays.iter().map(|p| p.cards.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Play> {
        std::mem::take(&mut self.plays)
    }
}

/// A player's exit from the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderEntry {
    pub seat: Seat,
    pub round_no: u32,
    pub last_card: Option<Card>,
    pub finish: Finish,
}

/// One debtor/creditor pair of the post-game exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangePair {
    /// Owes its strongest cards.
    pub debtor: Seat,
    /// Receives them and gives cards of its choosing back.
    pub creditor: Seat,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeState {
    pub plan: Vec<ExchangePair>,
    /// Index of the pair being processed.
    pub next: usize,
    /// Cards actually moved as tribute for the current pair.
    pub tribute: Option<usize>,
}

/// Entire table container, sufficient for pure domain operations.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    pub rules: RuleSet,
    pub players: Vec<Player>,
    pub order: ValueOrder,
    pub pile: Pile,
    /// Archived piles of this game, one entry per round.
    pub history: Vec<Vec<Play>>,
    /// Cards parked by a cancellation.
    pub unresolved: Vec<Card>,
    pub cursor: TurnCursor,
    /// Seat the engine is waiting on.
    pub turn: Option<Seat>,
    /// Cards per combination, fixed by the round's first play.
    pub required_count: Option<usize>,
    /// Seat that laid the top combination.
    pub last_player: Option<Seat>,
    /// Seats that passed (or were skipped) since the last play.
    pub passed: BTreeSet<Seat>,
    pub winners: Vec<LadderEntry>,
    pub losers: Vec<LadderEntry>,
    pub game_no: u32,
    /// 1-based within the current game.
    pub round_no: u32,
    pub round_start: Seat,
    /// Where the next round opens.
    pub next_start: Option<Seat>,
    pub exchange: ExchangeState,
    pub revolutions: u32,
}

impl GameState {
    pub fn new(
        rules: RuleSet,
        seats: impl IntoIterator<Item = (String, PlayerKind)>,
    ) -> Result<Self, DomainError> {
        rules.validate()?;
        let players: Vec<Player> = seats
            .into_iter()
            .enumerate()
            .map(|(i, (name, kind))| Player::new(i as Seat, name, kind))
            .collect();
        if players.len() < 2 {
            return Err(DomainError::config(format!(
                "at least 2 players are needed, got {}",
                players.len()
            )));
        }
        if players.len() > rules.deck.deck_size() || players.len() > Seat::MAX as usize {
            return Err(DomainError::config(format!(
                "{} players cannot share a {}-card deck",
                players.len(),
                rules.deck.deck_size()
            )));
        }
        let order = ValueOrder::new(rules.deck.rank_count());
        Ok(Self {
            phase: Phase::NotStarted,
            rules,
            players,
            order,
            pile: Pile::default(),
            history: Vec::new(),
            unresolved: Vec::new(),
            cursor: TurnCursor::new(0),
            turn: None,
            required_count: None,
            last_player: None,
            passed: BTreeSet::new(),
            winners: Vec::new(),
            losers: Vec::new(),
            game_no: 0,
            round_no: 0,
            round_start: 0,
            next_start: None,
            exchange: ExchangeState::default(),
            revolutions: 0,
        })
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, seat: Seat) -> Result<&Player, DomainError> {
        self.players
            .get(seat as usize)
            .ok_or_else(|| DomainError::PlayerNotFound(format!("seat {seat}")))
    }

    pub fn player_mut(&mut self, seat: Seat) -> Result<&mut Player, DomainError> {
        self.players
            .get_mut(seat as usize)
            .ok_or_else(|| DomainError::PlayerNotFound(format!("seat {seat}")))
    }

    pub fn seat_of(&self, token: PlayerToken) -> Result<Seat, DomainError> {
        self.players
            .iter()
            .find(|p| p.token == token)
            .map(|p| p.seat)
            .ok_or_else(|| DomainError::PlayerNotFound(format!("token {token}")))
    }

    pub fn unfinished_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_finished()).count()
    }

    pub fn revolution_active(&self) -> bool {
        self.order.is_reversed()
    }

    /// Cards across hands, pile, archive and the unresolved bucket.
    pub fn cards_accounted(&self) -> usize {
        let hands: usize = self.players.iter().map(Player::hand_len).sum();
        let archived: usize = self
            .history
            .iter()
            .flat_map(|round| round.iter())
            .map(|p| p.cards.len())
            .sum();
        hands + self.pile.card_count() + archived + self.unresolved.len()
    }

    /// Every dealt card is somewhere exactly once.
    pub fn check_conservation(&self) -> Result<(), DomainError> {
        if !self.phase.is_dealt() && self.phase != Phase::Cancelled {
            return Ok(());
        }
        let expected = self.rules.deck.deck_size();
        let actual = self.cards_accounted();
        if actual != expected {
            return Err(DomainError::phase(format!(
                "card conservation broken: {actual} of {expected} cards accounted"
            )));
        }
        Ok(())
    }

    /// Final standings: winners in finishing order, then losers from last to first.
    pub fn ladder(&self) -> Vec<LadderEntry> {
        self.winners
            .iter()
            .chain(self.losers.iter().rev())
            .copied()
            .collect()
    }
}
