//! The environment variable source.
//!
//! Variables named `<ID_UPPERCASE>_<FIELD>` are recognized; the prefix is
//! stripped and the rest lower-cased to form the field name.

use std::env;
use std::ffi::OsString;

use crate::error::{Error, Result};
use crate::identifier::ModuleIdentifier;
use crate::value::{RawMapping, Value};

/// Reads prefixed environment variables for one application.
///
/// # Examples
///
/// ```
/// use optlayer::{EnvironmentSource, ModuleIdentifier, Value};
///
/// let id = ModuleIdentifier::try_from("myapp").unwrap();
/// let source = EnvironmentSource::new(&id);
/// assert_eq!(source.prefix(), "MYAPP_");
///
/// let mapping = source
///     .read_from([("MYAPP_TIMEOUT", "45"), ("PATH", "/usr/bin")])
///     .unwrap();
/// assert_eq!(mapping.len(), 1);
/// assert_eq!(mapping["timeout"], Value::from("45"));
/// ```
#[derive(Debug, Clone)]
pub struct EnvironmentSource {
    prefix: String,
}

impl EnvironmentSource {
    /// Creates a source for the identifier's prefix.
    #[must_use]
    pub fn new(identifier: &ModuleIdentifier) -> Self {
        Self {
            prefix: identifier.env_prefix(),
        }
    }

    /// Returns the variable name prefix, e.g. `MYAPP_`.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Reads recognized variables from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnvironmentRead`] if a recognized variable's value is
    /// not valid Unicode.
    pub fn read(&self) -> Result<RawMapping> {
        self.read_from(env::vars_os())
    }

    /// Reads recognized variables from an explicit set of pairs.
    ///
    /// Keys that are not valid Unicode cannot carry the prefix and are
    /// skipped. Values are passed through as strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnvironmentRead`] if a recognized variable's value is
    /// not valid Unicode.
    pub fn read_from<I, K, V>(&self, vars: I) -> Result<RawMapping>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let mut mapping = RawMapping::new();

        for (key, value) in vars {
            let Ok(key) = key.into().into_string() else {
                continue;
            };
            let Some(field) = key.strip_prefix(&self.prefix) else {
                continue;
            };

            let value = value
                .into()
                .into_string()
                .map_err(|_| Error::EnvironmentRead { key: key.clone() })?;

            log::debug!("Using environment variable {key}");
            mapping.insert(field.to_lowercase(), Value::String(value));
        }

        Ok(mapping)
    }
}
