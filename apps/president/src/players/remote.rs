//! Networked human seat: posts a prompt and polls the mailbox for an answer.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::mailbox::{Mailbox, Submission};
use super::prompt::PromptView;
use crate::ai::{AiError, GiftRequest, PlayRequest, PlayStrategy};
use crate::domain::{weakest_cards, Card, Move, PlayerToken};

/// Waits at most `tick x (retries + 1)` per decision, then folds (or hands
/// back its weakest cards during the exchange).
pub struct RemotePrompt {
    token: PlayerToken,
    mailbox: Arc<Mailbox>,
    tick: Duration,
    retries: u32,
}

impl RemotePrompt {
    pub fn new(token: PlayerToken, mailbox: Arc<Mailbox>, tick: Duration, retries: u32) -> Self {
        Self {
            token,
            mailbox,
            tick,
            retries,
        }
    }

    pub fn token(&self) -> PlayerToken {
        self.token
    }

    fn wait(&self, prompt: PromptView) -> Result<Option<Submission>, AiError> {
        self.mailbox.post_prompt(self.token, prompt);
        match self.mailbox.wait_for(self.token, self.tick, self.retries) {
            Ok(submission) => Ok(Some(submission)),
            Err(AiError::Timeout) => {
                warn!(token = %self.token, "remote player timed out");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

impl PlayStrategy for RemotePrompt {
    fn choose_move(&mut self, request: &PlayRequest<'_>) -> Result<Move, AiError> {
        let answer = self.wait(PromptView::for_play(request))?;
        debug!(seat = request.seat, ?answer, "remote move");
        Ok(match answer {
            Some(Submission::Cards(cards)) => Move::Play(cards),
            Some(Submission::Fold) | None => Move::Fold,
        })
    }

    fn choose_gift(&mut self, request: &GiftRequest<'_>) -> Result<Vec<Card>, AiError> {
        let answer = self.wait(PromptView::for_gift(request))?;
        Ok(match answer {
            Some(Submission::Cards(cards)) => cards,
            Some(Submission::Fold) | None => {
                weakest_cards(request.hand, request.count, &request.order)
            }
        })
    }
}
