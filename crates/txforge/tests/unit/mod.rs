//! Unit tests for txforge binary crate components.
//!
//! Focused checks of individual modules of the txforge binary crate, run
//! through its public API.

pub mod cli_integration_test;
pub mod error_handling_test;
