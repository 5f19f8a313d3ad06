//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `show`: Resolve the options and print them
//! - `show_path`: Show the default configuration file path
//! - `show_env`: Show the environment prefix and recognized variables
//! - `fields`: List the declared fields and their types

pub mod fields;
pub mod show;
pub mod show_env;
pub mod show_path;

pub use fields::FieldsCommand;
pub use show::ShowCommand;
pub use show_env::ShowEnvCommand;
pub use show_path::ShowPathCommand;
