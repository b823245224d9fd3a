//! Whether another game follows the one just finished.

pub trait Replay: Send {
    fn play_another(&mut self, games_played: u32) -> bool;
}

/// Play a fixed number of games.
#[derive(Debug, Clone, Copy)]
pub struct GameBudget(pub u32);

impl Replay for GameBudget {
    fn play_another(&mut self, games_played: u32) -> bool {
        games_played < self.0
    }
}

/// A single game.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReplay;

impl Replay for NoReplay {
    fn play_another(&mut self, _games_played: u32) -> bool {
        false
    }
}

/// Ask a closure, e.g. one prompting the user.
impl<F> Replay for F
where
    F: FnMut(u32) -> bool + Send,
{
    fn play_another(&mut self, games_played: u32) -> bool {
        self(games_played)
    }
}
