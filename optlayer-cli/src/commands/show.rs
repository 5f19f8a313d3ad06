//! Command to resolve the options and print them.

use crate::error::CliError;
use crate::utils::{print_output, GlobalOptions};
use clap::Args;
use optlayer::output::OutputFormat;
use optlayer::Namespace;

/// Resolve the options from every enabled source and print them.
#[derive(Args)]
pub struct ShowCommand {
    /// Output format (toml, yaml, json, env)
    #[arg(long, value_name = "FORMAT", default_value = "toml")]
    pub format: OutputFormat,
}

impl ShowCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let parser = global.parser();
        let resolved = parser.resolve(&global.resolve_options())?;

        log::debug!("Resolved options: {resolved:?}");

        let formatter = self.format.create_formatter(parser.env_prefix());
        let rendered = formatter.format(&resolved.to_mapping())?;
        print_output(&rendered)
    }
}
