//! Command to list the declared fields.

use crate::cli::DemoOptions;
use crate::error::CliError;
use crate::utils::{print_output, GlobalOptions};
use clap::Args;
use optlayer::Namespace;

/// List the declared fields and their types, one per line.
#[derive(Args)]
pub struct FieldsCommand {}

impl FieldsCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let lines: Vec<String> = DemoOptions::FIELDS
            .iter()
            .map(|spec| format!("{}\t{}", spec.name, spec.ty))
            .collect();

        print_output(&lines.join("\n"))
    }
}
