//! Random AI player - lays a uniformly random legal combination.
//!
//! A baseline for the simulator and for fuzzing the table driver.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::trait_def::{AiError, GiftRequest, PlayRequest, PlayStrategy};
use crate::domain::{Card, Move};

pub struct RandomPlayer {
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    /// `None` seeds from system entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }
}

impl PlayStrategy for RandomPlayer {
    fn choose_move(&mut self, request: &PlayRequest<'_>) -> Result<Move, AiError> {
        let mut options = request.legal_combinations();
        // Folding is always an option when following.
        let fold_slot = usize::from(!request.is_leading() || options.is_empty());
        let pick = self.rng.random_range(0..options.len() + fold_slot);
        if pick < options.len() {
            Ok(Move::Play(options.swap_remove(pick)))
        } else {
            Ok(Move::Fold)
        }
    }

    fn choose_gift(&mut self, request: &GiftRequest<'_>) -> Result<Vec<Card>, AiError> {
        let chosen: Vec<Card> = request
            .hand
            .choose_multiple(&mut self.rng, request.count)
            .copied()
            .collect();
        if chosen.len() != request.count {
            return Err(AiError::Internal(format!(
                "asked for {} cards with {} in hand",
                request.count,
                request.hand.len()
            )));
        }
        Ok(chosen)
    }
}
