//! How to register a strategy
//!
//! 1) Implement `PlayStrategy` for your type in its module.
//! 2) Add an `AiFactory` entry to the static list with a stable `name` and `version`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Determinism: same seed, same behaviour.

use crate::ai::{AiConfig, HeuristicAi, PlayStrategy, RandomPlayer};

/// Factory definition for constructing AI implementations.
pub struct AiFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(config: AiConfig) -> Box<dyn PlayStrategy>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: HeuristicAi::NAME,
        version: HeuristicAi::VERSION,
        make: make_heuristic,
    },
    AiFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        make: make_random_player,
    },
];

/// Returns the statically registered AI factories.
pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

/// Finds a registered AI factory by its name.
pub fn by_name(name: &str) -> Option<&'static AiFactory> {
    registered_ais().iter().find(|factory| factory.name == name)
}

/// The factory used when none is named.
pub fn default_ai() -> &'static AiFactory {
    &AI_FACTORIES[0]
}

fn make_heuristic(config: AiConfig) -> Box<dyn PlayStrategy> {
    Box::new(HeuristicAi::new(config))
}

fn make_random_player(config: AiConfig) -> Box<dyn PlayStrategy> {
    Box::new(RandomPlayer::new(config.seed()))
}
