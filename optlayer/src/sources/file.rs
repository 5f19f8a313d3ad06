//! The configuration file source.
//!
//! Reads a TOML (or YAML) file into a raw mapping. Whether a missing or
//! unreadable file is fatal is up to the caller through
//! [`FileOptions::strict`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::identifier::ModuleIdentifier;
use crate::value::{RawMapping, Value};

/// Options for reading the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOptions {
    /// Explicit file to read instead of the default path.
    pub path: Option<PathBuf>,
    /// Whether read failures are returned (`true`) or degrade to an empty
    /// mapping with a log entry (`false`).
    pub strict: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            path: None,
            strict: true,
        }
    }
}

/// The file format a configuration file is decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// TOML, the default.
    Toml,
    /// YAML, for `.yaml` and `.yml` files.
    Yaml,
}

impl FileFormat {
    /// Chooses the format from a path's extension.
    ///
    /// ```
    /// use optlayer::sources::FileFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(FileFormat::from_path(Path::new("app.yml")), FileFormat::Yaml);
    /// assert_eq!(FileFormat::from_path(Path::new("app.toml")), FileFormat::Toml);
    /// assert_eq!(FileFormat::from_path(Path::new("apprc")), FileFormat::Toml);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Toml,
        }
    }

    /// Decodes file contents into a raw mapping.
    ///
    /// The top level of the document must be a table. An empty YAML
    /// document decodes to an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the contents are malformed.
    pub fn decode(self, path: &Path, contents: &str) -> Result<RawMapping> {
        let decode_error = |message: String| Error::Decode {
            path: path.to_path_buf(),
            message,
        };

        match self {
            Self::Toml => {
                let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| {
                    decode_error(e.message().to_string())
                })?;
                Ok(table
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect())
            }
            Self::Yaml => {
                let doc: serde_yaml::Value =
                    serde_yaml::from_str(contents).map_err(|e| decode_error(e.to_string()))?;
                match Value::from_yaml(doc).map_err(decode_error)? {
                    Value::Null => Ok(RawMapping::new()),
                    Value::Table(table) => Ok(table),
                    other => Err(decode_error(format!(
                        "top level must be a mapping, found {}",
                        other.type_name()
                    ))),
                }
            }
        }
    }
}

/// Reads configuration files for one application.
///
/// # Examples
///
/// ```no_run
/// use optlayer::{FileOptions, FileSource, ModuleIdentifier};
///
/// let id = ModuleIdentifier::try_from("myapp").unwrap();
/// let source = FileSource::new(&id);
///
/// // Missing default file is tolerated in lenient mode
/// let mapping = source
///     .read(&FileOptions { path: None, strict: false })
///     .unwrap();
/// println!("{} keys", mapping.len());
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    default_path: Option<PathBuf>,
}

impl FileSource {
    /// Creates a source whose default path is derived from the identifier
    /// and the current user's home directory.
    #[must_use]
    pub fn new(identifier: &ModuleIdentifier) -> Self {
        Self {
            default_path: identifier.default_config_path().ok(),
        }
    }

    /// Creates a source with an explicit default path.
    #[must_use]
    pub fn with_default_path(path: impl Into<PathBuf>) -> Self {
        Self {
            default_path: Some(path.into()),
        }
    }

    /// Returns the default configuration file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HomeDirectoryUnavailable`] if the path could not be
    /// derived.
    pub fn default_path(&self) -> Result<&Path> {
        self.default_path
            .as_deref()
            .ok_or(Error::HomeDirectoryUnavailable)
    }

    /// Reads and decodes the configuration file.
    ///
    /// - A missing file is [`Error::FileNotFound`] when strict; otherwise an
    ///   empty mapping and a debug log entry.
    /// - Any other failure is returned when strict; otherwise an empty
    ///   mapping and a warning.
    ///
    /// The result is never partially decoded.
    ///
    /// # Errors
    ///
    /// Only in strict mode: [`Error::FileNotFound`], [`Error::FileRead`],
    /// [`Error::Decode`] or [`Error::HomeDirectoryUnavailable`].
    pub fn read(&self, options: &FileOptions) -> Result<RawMapping> {
        match self.try_read(options.path.as_deref()) {
            Ok(mapping) => Ok(mapping),
            Err(e) if options.strict => Err(e),
            Err(e) if e.is_not_found() => {
                log::debug!(
                    "The configuration file could not be read because it could not be found: {e}"
                );
                Ok(RawMapping::new())
            }
            Err(e) => {
                log::warn!("Could not read the configuration file: {e}");
                Ok(RawMapping::new())
            }
        }
    }

    fn try_read(&self, path: Option<&Path>) -> Result<RawMapping> {
        let path = match path {
            Some(path) => path,
            None => self.default_path()?,
        };

        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::FileRead {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let mapping = FileFormat::from_path(path).decode(path, &contents)?;
        log::debug!(
            "Read {} key(s) from configuration file {}",
            mapping.len(),
            path.display()
        );
        Ok(mapping)
    }
}
