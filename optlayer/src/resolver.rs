//! Layered resolution of a namespace from its sources.
//!
//! # Precedence
//!
//! Sources are applied in a fixed order, each later write replacing an
//! earlier one for the same field (highest to lowest):
//!
//! 1. Environment variables (`<ID>_*`)
//! 2. Configuration file (`~/.config/<id>/<id>.toml`)
//! 3. Command-line arguments
//! 4. Unset (`None`)
//!
//! This is a last-write-wins merge per top-level field, not a deep merge.

use std::ffi::OsString;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::identifier::ModuleIdentifier;
use crate::namespace::Namespace;
use crate::sources::{
    ArgsOptions, ArgumentSource, ClapArguments, EnvironmentSource, FileOptions, FileSource,
};
use crate::value::RawMapping;

/// Which sources to consult and how.
///
/// All sources are enabled by default and the file source is strict.
///
/// # Examples
///
/// ```
/// use optlayer::ResolveOptions;
///
/// let options = ResolveOptions::new()
///     .skip_env()
///     .with_args(["app", "--timeout", "10"])
///     .lenient();
///
/// assert!(options.use_args);
/// assert!(options.use_file);
/// assert!(!options.use_env);
/// assert!(!options.file.strict);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Build the base namespace from command-line arguments.
    pub use_args: bool,
    /// Apply the configuration file.
    pub use_file: bool,
    /// Apply environment variables.
    pub use_env: bool,
    /// Options for the argument source.
    pub args: ArgsOptions,
    /// Options for the file source.
    pub file: FileOptions,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            use_args: true,
            use_file: true,
            use_env: true,
            args: ArgsOptions::default(),
            file: FileOptions::default(),
        }
    }
}

impl ResolveOptions {
    /// Creates options with every source enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an empty namespace instead of parsing arguments.
    #[must_use]
    pub fn skip_args(mut self) -> Self {
        self.use_args = false;
        self
    }

    /// Does not read the configuration file.
    #[must_use]
    pub fn skip_file(mut self) -> Self {
        self.use_file = false;
        self
    }

    /// Does not read environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Parses the given command line instead of the process arguments.
    #[must_use]
    pub fn with_args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.args = ArgsOptions::from_args(args);
        self
    }

    /// Reads the given configuration file instead of the default one.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file.path = Some(path.into());
        self
    }

    /// Tolerates a missing or unreadable configuration file.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.file.strict = false;
        self
    }
}

/// Resolves a namespace from arguments, a configuration file and the
/// environment.
///
/// The parser is bound to one application identifier, from which it derives
/// the default file path and the environment prefix once, at construction.
///
/// # Examples
///
/// ```no_run
/// use optlayer::{namespace, ModuleIdentifier, OptionParser, ResolveOptions};
///
/// namespace! {
///     #[derive(Debug, clap::Parser)]
///     struct Options {
///         #[arg(long)]
///         timeout: i64,
///         #[arg(long)]
///         name: String,
///     }
/// }
///
/// let parser: OptionParser<Options> =
///     OptionParser::new(ModuleIdentifier::try_from("myapp").unwrap());
///
/// let options = parser.resolve(&ResolveOptions::new().lenient()).unwrap();
/// println!("timeout = {:?}", options.timeout);
/// ```
#[derive(Debug, Clone)]
pub struct OptionParser<N, A = ClapArguments> {
    identifier: ModuleIdentifier,
    arguments: A,
    file: FileSource,
    environment: EnvironmentSource,
    namespace: PhantomData<fn() -> N>,
}

impl<N> OptionParser<N, ClapArguments>
where
    N: Namespace + clap::Parser,
{
    /// Creates a parser whose namespace parses its own arguments with `clap`.
    #[must_use]
    pub fn new(identifier: ModuleIdentifier) -> Self {
        Self::with_arguments(identifier, ClapArguments)
    }
}

impl<N, A> OptionParser<N, A>
where
    N: Namespace,
    A: ArgumentSource<N>,
{
    /// Creates a parser with a custom argument source.
    #[must_use]
    pub fn with_arguments(identifier: ModuleIdentifier, arguments: A) -> Self {
        let file = FileSource::new(&identifier);
        let environment = EnvironmentSource::new(&identifier);
        Self {
            identifier,
            arguments,
            file,
            environment,
            namespace: PhantomData,
        }
    }

    /// Replaces the default configuration file path.
    ///
    /// Explicit paths in [`FileOptions`] still take priority.
    #[must_use]
    pub fn with_default_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = FileSource::with_default_path(path);
        self
    }

    /// Returns the application identifier.
    #[must_use]
    pub fn identifier(&self) -> &ModuleIdentifier {
        &self.identifier
    }

    /// Returns the default configuration file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HomeDirectoryUnavailable`](crate::Error::HomeDirectoryUnavailable)
    /// if it could not be derived.
    pub fn config_path(&self) -> Result<&Path> {
        self.file.default_path()
    }

    /// Returns the environment variable prefix.
    #[must_use]
    pub fn env_prefix(&self) -> &str {
        self.environment.prefix()
    }

    /// Parses command-line arguments into a namespace.
    ///
    /// # Errors
    ///
    /// Returns the argument source's error unchanged.
    pub fn parse_args(&self, options: &ArgsOptions) -> Result<N> {
        self.arguments.parse(options)
    }

    /// Reads the configuration file into a raw mapping.
    ///
    /// # Errors
    ///
    /// See [`FileSource::read`].
    pub fn read_config(&self, options: &FileOptions) -> Result<RawMapping> {
        self.file.read(options)
    }

    /// Reads the recognized environment variables into a raw mapping.
    ///
    /// # Errors
    ///
    /// See [`EnvironmentSource::read`].
    pub fn read_environment(&self) -> Result<RawMapping> {
        self.environment.read()
    }

    /// Resolves the namespace from the enabled sources.
    ///
    /// 1. The base namespace comes from the argument source, or is empty.
    /// 2. Every configuration file entry is assigned over it.
    /// 3. Every recognized environment variable is assigned over that.
    ///
    /// Each assignment goes through [`Namespace::set`], so unknown fields and
    /// failed coercions abort resolution. Nothing partially merged is
    /// returned on failure.
    ///
    /// # Errors
    ///
    /// Returns the first error from a source (the file source only in strict
    /// mode) or from a field assignment.
    pub fn resolve(&self, options: &ResolveOptions) -> Result<N> {
        let mut namespace = if options.use_args {
            self.parse_args(&options.args)?
        } else {
            N::default()
        };

        if options.use_file {
            let mapping = self.read_config(&options.file)?;
            log::debug!("Applying {} configuration file value(s)", mapping.len());
            namespace.set_all(mapping)?;
        }

        if options.use_env {
            let mapping = self.read_environment()?;
            log::debug!(
                "Applying {} environment value(s) with prefix {}",
                mapping.len(),
                self.env_prefix()
            );
            namespace.set_all(mapping)?;
        }

        Ok(namespace)
    }
}
