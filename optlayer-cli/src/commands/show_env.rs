//! Command to show the environment variables the resolver would apply.

use crate::cli::DemoOptions;
use crate::error::CliError;
use crate::utils::{print_output, GlobalOptions};
use clap::Args;
use optlayer::Namespace;

/// Show the environment prefix and the recognized variables currently set.
///
/// Variables whose field is not declared are marked, since they would make
/// `show` fail.
#[derive(Args)]
pub struct ShowEnvCommand {}

impl ShowEnvCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let parser = global.parser();
        let prefix = parser.env_prefix();
        let mapping = parser.read_environment()?;

        let mut lines = vec![format!("# prefix {prefix}")];
        for (field, value) in &mapping {
            let key = format!("{prefix}{}", field.to_uppercase());
            match DemoOptions::field_type(field) {
                Some(ty) => lines.push(format!("{key}={value} # {field}: {ty}")),
                None => lines.push(format!("{key}={value} # unknown field")),
            }
        }

        print_output(&lines.join("\n"))
    }
}
