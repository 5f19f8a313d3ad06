#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # optlayer
//!
//! Layered option resolution: one strongly-typed namespace merged from
//! command-line arguments, a configuration file, and environment variables.
//!
//! ## Core Types
//!
//! - [`Namespace`] and [`namespace!`]: typed records with guarded assignment
//! - [`Value`] and [`RawMapping`]: raw values as produced by the sources
//! - [`ModuleIdentifier`]: the application name the file path and the
//!   environment prefix are derived from
//! - [`OptionParser`] and [`ResolveOptions`]: the merge engine
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Precedence
//!
//! Environment variables override the configuration file, which overrides
//! command-line arguments. Every value passes through [`Namespace::set`].
//!
//! ## Examples
//!
//! ```
//! use optlayer::{namespace, Namespace};
//!
//! namespace! {
//!     #[derive(Debug)]
//!     pub struct Options {
//!         pub timeout: i64,
//!         pub name: String,
//!     }
//! }
//!
//! let mut options = Options::default();
//! options.set("timeout", "45").unwrap();
//! assert_eq!(options.timeout, Some(45));
//! assert!(options.set("timeout", "soon").is_err());
//! ```

mod macros;

pub mod error;
pub mod identifier;
pub mod logging;
pub mod namespace;
pub mod output;
pub mod resolver;
pub mod sources;
pub mod value;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use identifier::ModuleIdentifier;
pub use logging::{init_logger, LogLevel, Logger};
pub use namespace::{FieldSpec, FieldType, FieldValue, Namespace};
pub use resolver::{OptionParser, ResolveOptions};
pub use sources::{
    ArgsOptions, ArgumentSource, ClapArguments, EnvironmentSource, FileFormat, FileOptions,
    FileSource, NoArguments, ParsedArguments,
};
pub use value::{RawMapping, Value};
