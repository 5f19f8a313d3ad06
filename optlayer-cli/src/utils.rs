//! Utility functions for CLI operations.
//!
//! This module provides the glue between the global flags and the library:
//! building the option parser and the resolve options, and writing output.

use crate::cli::DemoOptions;
use crate::error::CliError;
use optlayer::{ModuleIdentifier, OptionParser, ParsedArguments, ResolveOptions};
use std::io::Write;
use std::path::PathBuf;

/// Parser type used by every command.
///
/// The namespace has already been parsed by clap as part of [`crate::Cli`],
/// so the argument source hands back that value.
pub type DemoParser = OptionParser<DemoOptions, ParsedArguments<DemoOptions>>;

/// Global CLI options shared across all commands.
///
/// Verbosity is not carried here; `main` hands it to `init_logger`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Application identifier.
    pub identifier: ModuleIdentifier,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,

    /// Tolerate file source failures.
    pub lenient: bool,

    /// Skip the configuration file.
    pub no_file: bool,

    /// Skip environment variables.
    pub no_env: bool,

    /// Namespace values given as flags.
    pub options: DemoOptions,
}

impl GlobalOptions {
    /// Build the option parser for these options.
    pub fn parser(&self) -> DemoParser {
        OptionParser::with_arguments(
            self.identifier.clone(),
            ParsedArguments::new(self.options.clone()),
        )
    }

    /// Translate the source flags into resolve options.
    pub fn resolve_options(&self) -> ResolveOptions {
        let mut options = ResolveOptions::new();
        if self.no_file {
            options = options.skip_file();
        }
        if self.no_env {
            options = options.skip_env();
        }
        if let Some(path) = &self.config {
            options = options.with_config_path(path);
        }
        if self.lenient {
            options = options.lenient();
        }
        options
    }
}

/// Write `text` to stdout followed by a newline, unless it is empty.
pub fn print_output(text: &str) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let text = text.trim_end_matches('\n');
    if !text.is_empty() {
        writeln!(out, "{text}")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global() -> GlobalOptions {
        GlobalOptions {
            identifier: ModuleIdentifier::try_from("utiltest").unwrap(),
            config: None,
            lenient: false,
            no_file: false,
            no_env: false,
            options: DemoOptions::default(),
        }
    }

    #[test]
    fn test_resolve_options_defaults() {
        let options = global().resolve_options();
        assert!(options.use_args && options.use_file && options.use_env);
        assert!(options.file.strict);
        assert_eq!(options.file.path, None);
    }

    #[test]
    fn test_resolve_options_from_flags() {
        let mut g = global();
        g.no_env = true;
        g.lenient = true;
        g.config = Some(PathBuf::from("/tmp/app.toml"));

        let options = g.resolve_options();
        assert!(!options.use_env);
        assert!(options.use_file);
        assert!(!options.file.strict);
        assert_eq!(options.file.path, Some(PathBuf::from("/tmp/app.toml")));
    }

    #[test]
    fn test_parser_uses_identifier() {
        let parser = global().parser();
        assert_eq!(parser.env_prefix(), "UTILTEST_");
        assert_eq!(parser.identifier().as_str(), "utiltest");
    }
}
