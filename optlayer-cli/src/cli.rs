//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options, the demonstration namespace, and subcommands.

use crate::commands::{FieldsCommand, ShowCommand, ShowEnvCommand, ShowPathCommand};
use clap::{Parser, Subcommand};
use optlayer::{ModuleIdentifier, Value};
use std::path::PathBuf;

/// Identifier used when neither `--identifier` nor `OPTLAYER_IDENTIFIER` is
/// given.
///
/// Its prefix `OPTLAYER_DEMO_` must not cover the tool's own `OPTLAYER_*`
/// settings, or the environment source would read them as fields.
pub const DEFAULT_IDENTIFIER: &str = "optlayer-demo";

optlayer::namespace! {
    /// The options `optlayer` resolves.
    ///
    /// Each field can come from its flag, from the configuration file, or
    /// from a `<ID>_<FIELD>` environment variable.
    #[derive(Debug, Clone, PartialEq, clap::Args)]
    pub struct DemoOptions {
        /// Timeout in seconds
        #[arg(long, value_name = "SECONDS", global = true)]
        pub timeout: i64,

        /// Display name
        #[arg(long, value_name = "NAME", global = true)]
        pub name: String,

        /// Ratio between 0 and 1
        #[arg(long, value_name = "RATIO", global = true)]
        pub ratio: f64,

        // Any-typed: the environment can only supply strings
        /// Enable debug mode
        #[arg(
            long,
            value_name = "BOOL",
            global = true,
            num_args = 0..=1,
            default_missing_value = "true",
            value_parser = parse_debug_flag
        )]
        pub debug: Value,
    }
}

/// Parses the `--debug` flag value into a boolean [`Value`].
fn parse_debug_flag(s: &str) -> Result<Value, String> {
    s.parse::<bool>()
        .map(Value::Bool)
        .map_err(|_| format!("expected true or false, found '{s}'"))
}

/// Command-line tool for inspecting layered option resolution.
#[derive(Parser)]
#[command(name = "optlayer")]
#[command(version, about = "Resolve options from arguments, a config file and the environment", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Application identifier used for the config path and the variable prefix
    #[arg(
        long,
        value_name = "ID",
        global = true,
        env = "OPTLAYER_IDENTIFIER",
        default_value = DEFAULT_IDENTIFIER
    )]
    pub identifier: ModuleIdentifier,

    /// Read this configuration file instead of the default one
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Tolerate a missing or unreadable configuration file
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Do not read the configuration file
    #[arg(long, global = true)]
    pub no_file: bool,

    /// Do not read environment variables
    #[arg(long, global = true)]
    pub no_env: bool,

    #[command(flatten)]
    pub options: DemoOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve the options and print them
    Show(ShowCommand),

    /// Show the default configuration file path
    ShowPath(ShowPathCommand),

    /// Show the environment prefix and the recognized variables
    ShowEnv(ShowEnvCommand),

    /// List the declared fields and their types
    Fields(FieldsCommand),
}
