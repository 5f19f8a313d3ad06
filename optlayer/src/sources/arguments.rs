//! The argument source.
//!
//! Argument grammar is delegated entirely to `clap`. The source's job is to
//! produce the base namespace that the file and environment layers are
//! applied on top of.

use std::ffi::OsString;
use std::marker::PhantomData;

use crate::error::Result;
use crate::namespace::Namespace;

/// Options for the argument source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgsOptions {
    /// Explicit command line, including the binary name.
    ///
    /// When `None`, the process arguments are parsed.
    pub args: Option<Vec<OsString>>,
}

impl ArgsOptions {
    /// Creates options that parse the given command line.
    #[must_use]
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self {
            args: Some(args.into_iter().map(Into::into).collect()),
        }
    }
}

/// Produces the base namespace from command-line arguments.
pub trait ArgumentSource<N: Namespace> {
    /// Parses arguments into a populated namespace.
    ///
    /// # Errors
    ///
    /// Returns the argument parser's error unchanged.
    fn parse(&self, options: &ArgsOptions) -> Result<N>;
}

/// Parses arguments with the namespace's own `clap::Parser` derive.
///
/// # Examples
///
/// ```
/// use optlayer::{namespace, ArgsOptions, ArgumentSource, ClapArguments};
///
/// namespace! {
///     #[derive(Debug, clap::Parser)]
///     struct Options {
///         #[arg(long)]
///         timeout: i64,
///     }
/// }
///
/// let options: Options = ClapArguments
///     .parse(&ArgsOptions::from_args(["app", "--timeout", "10"]))
///     .unwrap();
/// assert_eq!(options.timeout, Some(10));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ClapArguments;

impl<N> ArgumentSource<N> for ClapArguments
where
    N: Namespace + clap::Parser,
{
    fn parse(&self, options: &ArgsOptions) -> Result<N> {
        let parsed = match &options.args {
            Some(args) => N::try_parse_from(args)?,
            None => N::try_parse()?,
        };
        Ok(parsed)
    }
}

/// Hands out a namespace that was already parsed elsewhere.
///
/// Useful when the namespace is flattened into a larger `clap` command and
/// the outer parser has already run. The options' explicit arguments are
/// ignored.
#[derive(Debug, Clone)]
pub struct ParsedArguments<N> {
    parsed: N,
}

impl<N> ParsedArguments<N> {
    /// Wraps an already parsed namespace.
    pub const fn new(parsed: N) -> Self {
        Self { parsed }
    }
}

impl<N: Namespace + Clone> ArgumentSource<N> for ParsedArguments<N> {
    fn parse(&self, _options: &ArgsOptions) -> Result<N> {
        Ok(self.parsed.clone())
    }
}

/// Argument source for callers that never parse arguments.
///
/// Always produces an empty namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArguments<N>(PhantomData<N>);

impl<N> NoArguments<N> {
    /// Creates the source.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<N: Namespace> ArgumentSource<N> for NoArguments<N> {
    fn parse(&self, _options: &ArgsOptions) -> Result<N> {
        Ok(N::default())
    }
}
