//! The three configuration sources.
//!
//! - [`arguments`]: command-line arguments, parsed by `clap`
//! - [`file`]: a TOML or YAML configuration file
//! - [`environment`]: prefixed environment variables
//!
//! The sources are independent of each other. Ordering and precedence are
//! decided by [`OptionParser`](crate::OptionParser) alone.

pub mod arguments;
pub mod environment;
pub mod file;

pub use arguments::{ArgsOptions, ArgumentSource, ClapArguments, NoArguments, ParsedArguments};
pub use environment::EnvironmentSource;
pub use file::{FileFormat, FileOptions, FileSource};
