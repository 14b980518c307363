//! HBnB CLI
//!
//! This crate provides the command-line interface for the HBnB API:
//! - run: Start the server
//! - stats: Print object counts per collection

pub mod commands;
pub mod logging;

pub use commands::{Cli, Commands};
pub use logging::Logging;
