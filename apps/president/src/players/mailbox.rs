//! Hand-off point between network commands and the seats waiting on them.
//!
//! The session writes, the table's remote seats read. One lock guards it all;
//! readers park on a condition variable between polls.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use tracing::debug;

use super::prompt::PromptView;
use crate::ai::AiError;
use crate::domain::{Card, PlayerToken};

/// A remote player's answer, already parsed against the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Cards(Vec<Card>),
    Fold,
}

#[derive(Debug, Default)]
struct Slots {
    pending: HashMap<PlayerToken, Submission>,
    prompts: HashMap<PlayerToken, PromptView>,
    departed: HashSet<PlayerToken>,
    cancelled: bool,
}

#[derive(Debug, Default)]
pub struct Mailbox {
    slots: Mutex<Slots>,
    signal: Condvar,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an answer to the prompt `token` is looking at, replacing any
    /// earlier one not yet picked up. Returns `false` when no prompt is open.
    pub fn submit(&self, token: PlayerToken, submission: Submission) -> bool {
        let mut slots = self.slots.lock();
        if !slots.prompts.contains_key(&token) {
            debug!(%token, "submission without an open prompt");
            return false;
        }
        let replaced = slots.pending.insert(token, submission).is_some();
        drop(slots);
        debug!(%token, replaced, "submission stored");
        self.signal.notify_all();
        true
    }

    pub fn post_prompt(&self, token: PlayerToken, prompt: PromptView) {
        self.slots.lock().prompts.insert(token, prompt);
    }

    /// The question `token` is currently expected to answer.
    pub fn prompt_for(&self, token: PlayerToken) -> Option<PromptView> {
        self.slots.lock().prompts.get(&token).cloned()
    }

    pub fn has_pending(&self, token: PlayerToken) -> bool {
        self.slots.lock().pending.contains_key(&token)
    }

    /// The player left; its seat stops waiting from now on.
    pub fn depart(&self, token: PlayerToken) {
        let mut slots = self.slots.lock();
        slots.departed.insert(token);
        slots.pending.remove(&token);
        drop(slots);
        self.signal.notify_all();
    }

    pub fn has_departed(&self, token: PlayerToken) -> bool {
        self.slots.lock().departed.contains(&token)
    }

    pub fn cancel(&self) {
        self.slots.lock().cancelled = true;
        self.signal.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        self.slots.lock().cancelled
    }

    /// Wait for `token`'s answer, checking once per `tick` up to `retries`
    /// extra times.
    ///
    /// A departed player answers `Fold` at once. Cancellation wins over any
    /// pending answer. The prompt is closed on return, so answers arriving
    /// later are refused.
    pub fn wait_for(
        &self,
        token: PlayerToken,
        tick: Duration,
        retries: u32,
    ) -> Result<Submission, AiError> {
        let mut slots = self.slots.lock();
        for _ in 0..=retries {
            if slots.cancelled {
                return Err(AiError::Cancelled);
            }
            if slots.departed.contains(&token) {
                slots.prompts.remove(&token);
                return Ok(Submission::Fold);
            }
            if let Some(submission) = slots.pending.remove(&token) {
                slots.prompts.remove(&token);
                return Ok(submission);
            }
            self.signal.wait_for(&mut slots, tick);
        }
        slots.prompts.remove(&token);
        match slots.pending.remove(&token) {
            Some(submission) => Ok(submission),
            None => Err(AiError::Timeout),
        }
    }
}
