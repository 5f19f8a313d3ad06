//! Error types for the optlayer library.
//!
//! This module provides the error hierarchy for option resolution, using
//! `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::namespace::FieldType;

/// Result type alias for operations that may fail with an optlayer error.
///
/// # Examples
///
/// ```
/// use optlayer::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(30)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the optlayer library.
///
/// Field errors (`UnknownField`, `Coercion`, `TypeMismatch`) are always
/// fatal. Source errors (`FileNotFound`, `FileRead`, `Decode`,
/// `HomeDirectoryUnavailable`, `EnvironmentRead`) are fatal only when the
/// responsible source is strict.
#[derive(Debug, Error)]
pub enum Error {
    /// A source supplied a field name the namespace does not declare.
    #[error("unknown field '{field}': not declared by the namespace")]
    UnknownField {
        /// The undeclared field name.
        field: String,
    },

    /// A value could not be converted to the field's declared type.
    #[error("cannot coerce {value} to {expected} for field '{field}': {reason}")]
    Coercion {
        /// The field being assigned.
        field: String,
        /// The declared type of the field.
        expected: FieldType,
        /// A rendering of the rejected value.
        value: String,
        /// Why the conversion failed.
        reason: String,
    },

    /// A value assigned as-is does not fit the field's storage type.
    #[error("type mismatch for field '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        /// The field being assigned.
        field: String,
        /// The declared type of the field.
        expected: FieldType,
        /// The runtime type of the supplied value.
        found: &'static str,
    },

    /// The configuration file does not exist.
    #[error("configuration file not found: {}", path.display())]
    FileNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    FileRead {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be decoded.
    #[error("invalid configuration file {}: {message}", path.display())]
    Decode {
        /// The path of the malformed file.
        path: PathBuf,
        /// The decoder's description of the problem.
        message: String,
    },

    /// The home directory needed for the default configuration path is unknown.
    #[error("cannot determine home directory for the default configuration path")]
    HomeDirectoryUnavailable,

    /// A recognized environment variable holds a value that is not valid Unicode.
    #[error("environment variable {key} is not valid unicode")]
    EnvironmentRead {
        /// The environment variable name.
        key: String,
    },

    /// The argument parser rejected the command line.
    #[error(transparent)]
    Arguments(#[from] clap::Error),

    /// A resolved namespace could not be rendered in an output format.
    #[error("cannot render {format} output: {message}")]
    Render {
        /// The output format.
        format: &'static str,
        /// The serializer's description of the problem.
        message: String,
    },

    /// An invalid module identifier was provided.
    #[error("invalid module identifier '{value}': {reason}")]
    InvalidIdentifier {
        /// The rejected identifier.
        value: String,
        /// The reason it was rejected.
        reason: String,
    },
}

impl Error {
    /// Check if error indicates the configuration file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use optlayer::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::FileNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Check if error means a source could not contribute.
    ///
    /// These are the errors a lenient file source degrades into an empty
    /// contribution.
    #[must_use]
    pub fn is_source_unavailable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::FileRead { .. }
                | Self::Decode { .. }
                | Self::HomeDirectoryUnavailable
                | Self::EnvironmentRead { .. }
        )
    }

    /// Check if error was raised by a namespace assignment.
    ///
    /// # Examples
    ///
    /// ```
    /// use optlayer::Error;
    ///
    /// let err = Error::UnknownField { field: "colour".to_string() };
    /// assert!(err.is_field_error());
    /// ```
    #[must_use]
    pub fn is_field_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownField { .. } | Self::Coercion { .. } | Self::TypeMismatch { .. }
        )
    }
}
