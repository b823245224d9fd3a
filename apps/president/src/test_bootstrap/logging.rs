#![cfg(test)]

//! Unit tests log through the same subscriber setup as the integration tests.

pub fn init() {
    president_test_support::logging::init();
}
