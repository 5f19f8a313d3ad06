//! Main entry point for the optlayer CLI.
//!
//! This is the command-line interface for layered option resolution.
//! It resolves a small demonstration namespace and provides commands:
//! - `show`: Resolve the options and print them
//! - `show-path`: Show the default configuration file path
//! - `show-env`: Show the environment prefix and recognized variables
//! - `fields`: List the declared fields and their types

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _level = optlayer::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        identifier: cli.identifier,
        config: cli.config,
        lenient: cli.lenient,
        no_file: cli.no_file,
        no_env: cli.no_env,
        options: cli.options,
    };

    let result = match cli.command {
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::ShowPath(cmd) => cmd.execute(&global),
        cli::Command::ShowEnv(cmd) => cmd.execute(&global),
        cli::Command::Fields(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
