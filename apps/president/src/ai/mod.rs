//! AI player module - automated decisions for seats without a human.
//!
//! This module provides:
//! - `PlayStrategy`, the trait every seat implementation satisfies
//! - `HeuristicAi`, the default deterministic player
//! - `RandomPlayer`, a seedable random baseline
//! - a registry of named factories

mod config;
mod heuristic;
mod names;
mod random;
pub mod registry;
mod trait_def;

#[cfg(test)]
mod tests_heuristic;

pub use config::AiConfig;
pub use heuristic::HeuristicAi;
pub use names::generate_name;
pub use random::RandomPlayer;
pub use registry::{by_name, registered_ais, AiFactory};
pub use trait_def::{AiError, GiftRequest, PlayRequest, PlayStrategy};
