//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One game record per line.
    Jsonl,
    /// CSV summary only.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AiType {
    Heuristic,
    Random,
}

impl AiType {
    /// Name in the strategy registry.
    pub fn name(self) -> &'static str {
        match self {
            AiType::Heuristic => "Heuristic",
            AiType::Random => "RandomPlayer",
        }
    }
}
