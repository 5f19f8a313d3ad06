//! The module identifier that names an application's configuration.
//!
//! An identifier such as `myapp` determines both the default configuration
//! file (`~/.config/myapp/myapp.toml`) and the environment variable prefix
//! (`MYAPP_`).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// File extension of the default configuration file.
pub const DEFAULT_CONFIG_EXTENSION: &str = "toml";

/// An application's canonical short name.
///
/// Identifiers are non-empty and contain only ASCII letters, digits, `-` and
/// `_`, so they are usable both as a directory name and inside an
/// environment variable name.
///
/// # Examples
///
/// ```
/// use optlayer::ModuleIdentifier;
/// use std::path::Path;
///
/// let id = ModuleIdentifier::try_from("myapp").unwrap();
/// assert_eq!(id.env_prefix(), "MYAPP_");
/// assert_eq!(
///     id.config_path_in(Path::new("/home/alice")),
///     Path::new("/home/alice/.config/myapp/myapp.toml"),
/// );
///
/// assert!(ModuleIdentifier::try_from("").is_err());
/// assert!(ModuleIdentifier::try_from("my app").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleIdentifier(String);

impl ModuleIdentifier {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the environment variable prefix, `<ID_UPPERCASE>_`.
    ///
    /// Hyphens become underscores since they are not portable in variable
    /// names.
    ///
    /// ```
    /// use optlayer::ModuleIdentifier;
    ///
    /// let id = ModuleIdentifier::try_from("my-app").unwrap();
    /// assert_eq!(id.env_prefix(), "MY_APP_");
    /// ```
    #[must_use]
    pub fn env_prefix(&self) -> String {
        format!("{}_", self.0.to_ascii_uppercase().replace('-', "_"))
    }

    /// Returns the default configuration file path under the given home
    /// directory: `<home>/.config/<id>/<id>.toml`.
    #[must_use]
    pub fn config_path_in(&self, home: &Path) -> PathBuf {
        home.join(".config")
            .join(&self.0)
            .join(format!("{}.{DEFAULT_CONFIG_EXTENSION}", self.0))
    }

    /// Returns the default configuration file path for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HomeDirectoryUnavailable`] if the home directory
    /// cannot be determined.
    pub fn default_config_path(&self) -> Result<PathBuf> {
        let home = home::home_dir().ok_or(Error::HomeDirectoryUnavailable)?;
        Ok(self.config_path_in(&home))
    }

    fn validate(value: &str) -> std::result::Result<(), String> {
        if value.is_empty() {
            return Err("identifier must not be empty".into());
        }

        if let Some(c) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(format!(
                "character {c:?} is not allowed (use ASCII letters, digits, '-' or '_')"
            ));
        }

        Ok(())
    }
}

impl TryFrom<String> for ModuleIdentifier {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        match Self::validate(&value) {
            Ok(()) => Ok(Self(value)),
            Err(reason) => Err(Error::InvalidIdentifier { value, reason }),
        }
    }
}

impl TryFrom<&str> for ModuleIdentifier {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::try_from(value.to_string())
    }
}

impl FromStr for ModuleIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_from(s)
    }
}

impl AsRef<str> for ModuleIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
