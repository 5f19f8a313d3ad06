//! Dynamically typed values carried between sources and namespaces.
//!
//! File and environment sources produce a [`RawMapping`] of field names to
//! [`Value`]s. The namespace decides what each value becomes once it is
//! assigned to a declared field.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// An unordered mapping of field names to raw values produced by a source.
///
/// A sorted map keeps diagnostics and rendered output stable; the order
/// carries no meaning for assignment.
pub type RawMapping = BTreeMap<String, Value>;

/// A raw configuration value as decoded from a source.
///
/// # Examples
///
/// ```
/// use optlayer::Value;
///
/// let value = Value::from(30);
/// assert_eq!(value.type_name(), "int");
/// assert_eq!(value.to_string(), "30");
///
/// let list = Value::List(vec![Value::from(1), Value::from("a")]);
/// assert_eq!(list.to_string(), "[1, \"a\"]");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Explicitly unset.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A table of named values.
    Table(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the name of this value's runtime type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Table(_) => "table",
        }
    }

    /// Returns true if this value is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Renders the value with strings quoted, as used in diagnostics.
    ///
    /// ```
    /// use optlayer::Value;
    ///
    /// assert_eq!(Value::from("x").repr(), "\"x\"");
    /// assert_eq!(Value::from(2.5).repr(), "2.5");
    /// ```
    #[must_use]
    pub fn repr(&self) -> String {
        let mut out = String::new();
        self.write_inline(&mut out, true);
        out
    }

    fn write_inline(&self, out: &mut String, quote_strings: bool) {
        match self {
            Self::Null => out.push_str("null"),
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Integer(i) => out.push_str(&i.to_string()),
            Self::Float(f) => out.push_str(&format_float(*f)),
            Self::String(s) if quote_strings => out.push_str(&format!("{s:?}")),
            Self::String(s) => out.push_str(s),
            Self::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_inline(out, true);
                }
                out.push(']');
            }
            Self::Table(table) => {
                out.push('{');
                for (i, (key, item)) in table.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(key);
                    out.push_str(" = ");
                    item.write_inline(out, true);
                }
                out.push('}');
            }
        }
    }

    /// Converts a decoded YAML document node into a value.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if a mapping key is not a string.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self, String> {
        Ok(match value {
            serde_yaml::Value::Null => Self::Null,
            serde_yaml::Value::Bool(b) => Self::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else {
                    // u64 values beyond i64 and real numbers both land here
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_yaml::Value::String(s) => Self::String(s),
            serde_yaml::Value::Sequence(items) => Self::List(
                items
                    .into_iter()
                    .map(Self::from_yaml)
                    .collect::<Result<_, _>>()?,
            ),
            serde_yaml::Value::Mapping(mapping) => {
                let mut table = BTreeMap::new();
                for (key, item) in mapping {
                    let serde_yaml::Value::String(key) = key else {
                        return Err(format!("mapping key {key:?} is not a string"));
                    };
                    table.insert(key, Self::from_yaml(item)?);
                }
                Self::Table(table)
            }
            serde_yaml::Value::Tagged(tagged) => Self::from_yaml(tagged.value)?,
        })
    }
}

/// Formats a float so that integral values keep a fractional part.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        let sign = if f > 0.0 { "" } else { "-" };
        format!("{sign}inf")
    } else {
        format!("{f:?}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_inline(&mut out, false);
        f.write_str(&out)
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::String(s),
            toml::Value::Integer(i) => Self::Integer(i),
            toml::Value::Float(f) => Self::Float(f),
            toml::Value::Boolean(b) => Self::Bool(b),
            toml::Value::Datetime(dt) => Self::String(dt.to_string()),
            toml::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            toml::Value::Table(table) => Self::Table(
                table
                    .into_iter()
                    .map(|(key, item)| (key, Self::from(item)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Table(
                map.into_iter()
                    .map(|(key, item)| (key, Self::from(item)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Self::Table(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
