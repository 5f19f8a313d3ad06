//! Library exports for optlayer-cli.
//!
//! This module exports the CLI structure so that tests and documentation
//! tooling can inspect it.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
