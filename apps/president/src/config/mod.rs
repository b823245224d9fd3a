//! Runtime configuration read from the environment.

pub mod session;

pub use session::SessionConfig;
