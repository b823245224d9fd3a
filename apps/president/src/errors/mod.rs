//! Error types shared by the engine, the strategies and the session layer.

pub mod domain;

#[cfg(test)]
mod tests_error_mapping;

pub use domain::{DomainError, ValidationKind};
