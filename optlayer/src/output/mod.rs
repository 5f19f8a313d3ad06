//! Output formatting for resolved namespaces.
//!
//! A resolved namespace is rendered from its [`RawMapping`] (see
//! [`Namespace::to_mapping`](crate::Namespace::to_mapping)) as TOML, YAML,
//! JSON, or `KEY=value` lines that could be fed back as environment
//! variables.

mod formatters;

use std::fmt;
use std::str::FromStr;

use crate::{RawMapping, Result};

pub use formatters::{EnvFormatter, JsonFormatter, TomlFormatter, YamlFormatter};

/// Trait for rendering a field mapping into an output format.
pub trait OutputFormatter {
    /// Format the given mapping into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping cannot be represented in the format.
    fn format(&self, mapping: &RawMapping) -> Result<String>;
}

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// TOML, the configuration file format. Unset fields are omitted.
    #[default]
    Toml,
    /// YAML. Unset fields are `null`.
    Yaml,
    /// Pretty-printed JSON. Unset fields are `null`.
    Json,
    /// `PREFIX_FIELD=value` lines. Unset fields are omitted.
    Env,
}

impl OutputFormat {
    /// Create a formatter for this output format.
    ///
    /// `env_prefix` is used by [`OutputFormat::Env`] only.
    #[must_use]
    pub fn create_formatter(&self, env_prefix: &str) -> Box<dyn OutputFormatter> {
        match self {
            Self::Toml => Box::new(TomlFormatter),
            Self::Yaml => Box::new(YamlFormatter),
            Self::Json => Box::new(JsonFormatter),
            Self::Env => Box::new(EnvFormatter::new(env_prefix)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => write!(f, "toml"),
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
            Self::Env => write!(f, "env"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "env" => Ok(Self::Env),
            _ => Err(format!(
                "invalid output format: {s} (expected toml, yaml, json or env)"
            )),
        }
    }
}
