//! Shared helpers for the integration tests.
//!
//! Kept free of a dependency on `president` so any test binary can use it.

pub mod logging;

use ulid::Ulid;

/// A unique string with the given prefix, e.g. for game names and file names.
///
/// ```
/// use president_test_support::unique_str;
///
/// let a = unique_str("game");
/// assert!(a.starts_with("game-"));
/// assert_ne!(a, unique_str("game"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique player name that still fits a table display.
pub fn unique_player(prefix: &str) -> String {
    let id = Ulid::new().to_string();
    format!("{prefix}-{}", &id[id.len() - 6..])
}
