//! Command to show the default configuration file path.

use crate::error::CliError;
use crate::utils::{print_output, GlobalOptions};
use clap::Args;

/// Show the configuration file path derived from the identifier.
#[derive(Args)]
pub struct ShowPathCommand {
    /// Print the path given with --config instead, when present
    #[arg(long)]
    pub effective: bool,
}

impl ShowPathCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let parser = global.parser();

        let path = match (&global.config, self.effective) {
            (Some(explicit), true) => explicit.clone(),
            _ => parser.config_path()?.to_path_buf(),
        };

        if !path.exists() {
            log::info!("{} does not exist", path.display());
        }

        print_output(&path.display().to_string())
    }
}
