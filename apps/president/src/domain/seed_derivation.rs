//! RNG seed derivation utilities for deterministic sessions.
//!
//! A session has one base seed; every game and every AI name draw gets its
//! own derived stream so that replays reproduce exactly.

/// Derive a seed for dealing the `game_no`-th game of a session.
pub fn derive_dealing_seed(session_seed: u64, game_no: u32) -> u64 {
    // Different multiplier from the AI seed to keep the streams apart
    session_seed
        .wrapping_add(u64::from(game_no).wrapping_mul(1_000_000))
        .wrapping_add(2)
}

/// Derive a seed for the AI seated at `seat`.
pub fn derive_ai_seed(session_seed: u64, seat: u8) -> u64 {
    session_seed
        .wrapping_add(u64::from(seat).wrapping_mul(100))
        .wrapping_add(1)
}
