//! Local human seat backed by a synchronous input collaborator.

use std::collections::VecDeque;

use tracing::{debug, warn};

use super::prompt::PromptView;
use crate::ai::{AiError, GiftRequest, PlayRequest, PlayStrategy};
use crate::domain::cards_logic::first_missing;
use crate::domain::{Card, DeckSpec, Move};

/// What a person typed in answer to a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Card tokens such as `"Q,hearts"`.
    Cards(Vec<String>),
    Fold,
}

/// Blocking source of human answers (terminal, test script, UI bridge).
pub trait MoveSource: Send {
    fn ask_move(&mut self, prompt: &PromptView) -> Result<Response, AiError>;

    fn ask_gift(&mut self, prompt: &PromptView) -> Result<Vec<String>, AiError>;
}

/// Adapts a [`MoveSource`] to a seat.
///
/// Unreadable tokens, cards the player does not hold and answers of the wrong
/// size all become an empty play, which the engine refuses and re-prompts.
/// Only the engine decides what counts as cheating.
pub struct HumanPrompt<S: MoveSource> {
    source: S,
}

impl<S: MoveSource> HumanPrompt<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

/// Parse `tokens` into held cards of exactly `expected` count, or nothing.
fn held_cards(
    deck: &DeckSpec,
    hand: &[Card],
    tokens: &[String],
    expected: Option<usize>,
) -> Vec<Card> {
    let mut cards = match deck.try_parse_cards(tokens) {
        Ok(cards) => cards,
        Err(err) => {
            debug!(error = %err, "unreadable answer");
            return Vec::new();
        }
    };
    if let Some(missing) = first_missing(hand, &cards) {
        warn!(card = %deck.format_card(missing), "answer names a card not in hand");
        return Vec::new();
    }
    if expected.is_some_and(|n| n != cards.len()) {
        debug!(given = cards.len(), ?expected, "answer has the wrong size");
        return Vec::new();
    }
    cards.sort();
    cards
}

impl<S: MoveSource> PlayStrategy for HumanPrompt<S> {
    fn choose_move(&mut self, request: &PlayRequest<'_>) -> Result<Move, AiError> {
        let prompt = PromptView::for_play(request);
        match self.source.ask_move(&prompt)? {
            Response::Fold => Ok(Move::Fold),
            Response::Cards(tokens) => Ok(Move::Play(held_cards(
                &request.rules.deck,
                request.hand,
                &tokens,
                request.required_count,
            ))),
        }
    }

    fn choose_gift(&mut self, request: &GiftRequest<'_>) -> Result<Vec<Card>, AiError> {
        let prompt = PromptView::for_gift(request);
        let tokens = self.source.ask_gift(&prompt)?;
        Ok(held_cards(
            &request.rules.deck,
            request.hand,
            &tokens,
            Some(request.count),
        ))
    }
}

/// Replays canned answers; folds (or gives nothing) once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    moves: VecDeque<Response>,
    gifts: VecDeque<Vec<String>>,
    /// Every prompt shown, in order.
    pub seen: Vec<PromptView>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(mut self, tokens: &[&str]) -> Self {
        self.moves
            .push_back(Response::Cards(tokens.iter().map(|t| t.to_string()).collect()));
        self
    }

    pub fn fold(mut self) -> Self {
        self.moves.push_back(Response::Fold);
        self
    }

    pub fn gift(mut self, tokens: &[&str]) -> Self {
        self.gifts
            .push_back(tokens.iter().map(|t| t.to_string()).collect());
        self
    }
}

impl MoveSource for ScriptedSource {
    fn ask_move(&mut self, prompt: &PromptView) -> Result<Response, AiError> {
        self.seen.push(prompt.clone());
        Ok(self.moves.pop_front().unwrap_or(Response::Fold))
    }

    fn ask_gift(&mut self, prompt: &PromptView) -> Result<Vec<String>, AiError> {
        self.seen.push(prompt.clone());
        Ok(self.gifts.pop_front().unwrap_or_default())
    }
}
