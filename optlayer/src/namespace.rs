//! Typed namespaces with guarded assignment.
//!
//! A namespace is a struct whose fields are all optional and whose shape is
//! described by a static table of [`FieldSpec`]s. Every value from every
//! source reaches the struct through [`Namespace::set`], which rejects
//! undeclared fields and coerces values for string, integer and float
//! fields.
//!
//! Namespaces are usually declared with the [`namespace!`](crate::namespace!)
//! macro, which generates the struct, the field table and the typed store
//! from a single declaration.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::value::{RawMapping, Value};

/// The declared semantic type of a namespace field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A string; non-string values are rendered.
    String,
    /// A 64-bit signed integer; values are parsed or converted.
    Integer,
    /// A 64-bit float; values are parsed or converted.
    Float,
    /// A boolean, assigned as-is.
    Bool,
    /// A list of values, assigned as-is.
    List,
    /// A table of values, assigned as-is.
    Table,
    /// Any value, assigned as-is.
    Any,
}

impl FieldType {
    /// Returns true for the primitive types whose values are coerced on
    /// assignment.
    #[must_use]
    pub const fn is_coercible(self) -> bool {
        matches!(self, Self::String | Self::Integer | Self::Float)
    }

    /// Returns true if a value's runtime type already matches this type.
    #[must_use]
    pub const fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Any, _)
                | (Self::String, Value::String(_))
                | (Self::Integer, Value::Integer(_))
                | (Self::Float, Value::Float(_))
                | (Self::Bool, Value::Bool(_))
                | (Self::List, Value::List(_))
                | (Self::Table, Value::Table(_))
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "str"),
            Self::Integer => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "bool"),
            Self::List => write!(f, "list"),
            Self::Table => write!(f, "table"),
            Self::Any => write!(f, "any"),
        }
    }
}

/// A declared field: its name and semantic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// The field name, as used by every source.
    pub name: &'static str,
    /// The declared type.
    pub ty: FieldType,
}

/// Rust types that can back a namespace field.
///
/// The implementation for each type fixes the field's [`FieldType`] and how
/// a (possibly coerced) [`Value`] is stored in it.
pub trait FieldValue: Sized {
    /// The semantic type this Rust type declares.
    const TYPE: FieldType;

    /// Converts an already coerced value, handing it back on mismatch.
    ///
    /// # Errors
    ///
    /// Returns the value unchanged if it does not fit this type.
    fn from_value(value: Value) -> std::result::Result<Self, Value>;

    /// Converts the stored field back into a value.
    fn to_value(&self) -> Value;
}

impl FieldValue for String {
    const TYPE: FieldType = FieldType::String;

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldValue for i64 {
    const TYPE: FieldType = FieldType::Integer;

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Integer(i) => Ok(i),
            other => Err(other),
        }
    }

    fn to_value(&self) -> Value {
        Value::Integer(*self)
    }
}

impl FieldValue for f64 {
    const TYPE: FieldType = FieldType::Float;

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Float(f) => Ok(f),
            other => Err(other),
        }
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FieldValue for bool {
    const TYPE: FieldType = FieldType::Bool;

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldValue for Vec<Value> {
    const TYPE: FieldType = FieldType::List;

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::List(items) => Ok(items),
            other => Err(other),
        }
    }

    fn to_value(&self) -> Value {
        Value::List(self.clone())
    }
}

impl FieldValue for BTreeMap<String, Value> {
    const TYPE: FieldType = FieldType::Table;

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Table(table) => Ok(table),
            other => Err(other),
        }
    }

    fn to_value(&self) -> Value {
        Value::Table(self.clone())
    }
}

impl FieldValue for Value {
    const TYPE: FieldType = FieldType::Any;

    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        Ok(value)
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}

/// A typed record of configuration fields.
///
/// Implementors declare their fields in [`Namespace::FIELDS`] and provide a
/// typed [`store`](Namespace::store). All other operations are derived.
/// The [`namespace!`](crate::namespace!) macro writes both for you.
///
/// # Examples
///
/// ```
/// use optlayer::{namespace, Error, Namespace};
///
/// namespace! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Options {
///         pub timeout: i64,
///         pub name: String,
///     }
/// }
///
/// let mut options = Options::default();
/// options.set("timeout", "45").unwrap();
/// options.set("name", 7).unwrap();
/// assert_eq!(options.timeout, Some(45));
/// assert_eq!(options.name.as_deref(), Some("7"));
///
/// let err = options.set("colour", "red").unwrap_err();
/// assert!(matches!(err, Error::UnknownField { .. }));
/// ```
pub trait Namespace: Default {
    /// The declared fields, in declaration order.
    const FIELDS: &'static [FieldSpec];

    /// Stores an already coerced value in the named field.
    ///
    /// [`Value::Null`] clears the field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] for an undeclared field and
    /// [`Error::TypeMismatch`] if the value does not fit the field's type.
    fn store(&mut self, field: &str, value: Value) -> Result<()>;

    /// Reads a field back as a value.
    ///
    /// Returns `None` for an undeclared field and `Some(Value::Null)` for a
    /// declared but unset one.
    fn get(&self, field: &str) -> Option<Value>;

    /// Returns the declared type of a field, if it is declared.
    fn field_type(field: &str) -> Option<FieldType> {
        Self::FIELDS
            .iter()
            .find(|spec| spec.name == field)
            .map(|spec| spec.ty)
    }

    /// Returns the declared field names in declaration order.
    fn field_names() -> Vec<&'static str> {
        Self::FIELDS.iter().map(|spec| spec.name).collect()
    }

    /// Assigns a value to a declared field.
    ///
    /// - An undeclared field fails with [`Error::UnknownField`].
    /// - [`Value::Null`] is always accepted and leaves the field unset,
    ///   whatever its declared type. Null is the "explicitly unset" marker
    ///   rather than a type mismatch.
    /// - For `str`, `int` and `float` fields a value of another runtime type
    ///   is coerced (see [`coerce`]); failure is [`Error::Coercion`].
    /// - Values for any other field type are stored unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`], [`Error::Coercion`] or
    /// [`Error::TypeMismatch`].
    fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        let ty = Self::field_type(field).ok_or_else(|| Error::UnknownField {
            field: field.to_string(),
        })?;
        let value = coerce(field, ty, value.into())?;
        self.store(field, value)
    }

    /// Assigns every pair of a raw mapping, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Namespace::set`].
    fn set_all(&mut self, mapping: RawMapping) -> Result<()> {
        for (field, value) in mapping {
            self.set(&field, value)?;
        }
        Ok(())
    }

    /// Returns every declared field and its current value.
    fn to_mapping(&self) -> RawMapping {
        Self::FIELDS
            .iter()
            .map(|spec| {
                let value = self.get(spec.name).unwrap_or_default();
                (spec.name.to_string(), value)
            })
            .collect()
    }
}

/// Stores a value in an optional field slot.
///
/// Used by the code that [`namespace!`](crate::namespace!) generates.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if the value does not fit `T`.
pub fn store_field<T: FieldValue>(slot: &mut Option<T>, field: &str, value: Value) -> Result<()> {
    if value.is_null() {
        *slot = None;
        return Ok(());
    }

    match T::from_value(value) {
        Ok(v) => {
            *slot = Some(v);
            Ok(())
        }
        Err(rejected) => Err(Error::TypeMismatch {
            field: field.to_string(),
            expected: T::TYPE,
            found: rejected.type_name(),
        }),
    }
}

/// Coerces a value to a field's declared type.
///
/// Null and values that already match pass through. Other field types than
/// `str`, `int` and `float` never coerce.
///
/// | declared | from string | from int | from float | from bool |
/// |----------|-------------|----------|------------|-----------|
/// | `str`    | -           | rendered | rendered   | rendered  |
/// | `int`    | parsed      | -        | truncated  | 0 / 1     |
/// | `float`  | parsed      | widened  | -          | 0.0 / 1.0 |
///
/// Lists and tables render into strings and fail for numbers.
///
/// # Errors
///
/// Returns [`Error::Coercion`] if the conversion is not possible.
///
/// # Examples
///
/// ```
/// use optlayer::namespace::{coerce, FieldType};
/// use optlayer::Value;
///
/// assert_eq!(coerce("t", FieldType::Integer, Value::from(" 45 ")).unwrap(), Value::from(45));
/// assert_eq!(coerce("t", FieldType::Float, Value::from(3)).unwrap(), Value::from(3.0));
/// assert_eq!(coerce("t", FieldType::String, Value::from(2.5)).unwrap(), Value::from("2.5"));
/// assert!(coerce("t", FieldType::Integer, Value::from("not-a-number")).is_err());
/// ```
pub fn coerce(field: &str, ty: FieldType, value: Value) -> Result<Value> {
    if value.is_null() || !ty.is_coercible() || ty.matches(&value) {
        return Ok(value);
    }

    let converted = match ty {
        FieldType::String => Ok(Value::String(value.to_string())),
        FieldType::Integer => to_integer(&value).map(Value::Integer),
        FieldType::Float => to_float(&value).map(Value::Float),
        _ => Ok(value.clone()),
    };

    converted.map_err(|reason| Error::Coercion {
        field: field.to_string(),
        expected: ty,
        value: value.repr(),
        reason,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn to_integer(value: &Value) -> std::result::Result<i64, String> {
    match value {
        Value::String(s) => {
            let digits = strip_digit_separators(s.trim())
                .ok_or_else(|| format!("invalid integer literal {s:?}"))?;
            digits
                .parse::<i64>()
                .map_err(|e| format!("invalid integer literal {s:?}: {e}"))
        }
        Value::Float(f) if !f.is_finite() => Err(format!("cannot convert float {f} to integer")),
        Value::Float(f) => {
            let truncated = f.trunc();
            if truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
                Ok(truncated as i64)
            } else {
                Err(format!("float {f} is out of integer range"))
            }
        }
        Value::Bool(b) => Ok(i64::from(*b)),
        other => Err(format!("a {} cannot be converted to int", other.type_name())),
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_float(value: &Value) -> std::result::Result<f64, String> {
    match value {
        Value::String(s) => {
            let digits = strip_digit_separators(s.trim())
                .ok_or_else(|| format!("invalid float literal {s:?}"))?;
            digits
                .parse::<f64>()
                .map_err(|e| format!("invalid float literal {s:?}: {e}"))
        }
        Value::Integer(i) => Ok(*i as f64),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(format!("a {} cannot be converted to float", other.type_name())),
    }
}

/// Removes `_` digit separators, which are only valid between two digits.
///
/// Returns `None` for a misplaced separator.
fn strip_digit_separators(s: &str) -> Option<String> {
    if !s.contains('_') {
        return Some(s.to_string());
    }

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'_' {
            let prev_digit = i > 0 && bytes[i - 1].is_ascii_digit();
            let next_digit = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
            if !(prev_digit && next_digit) {
                return None;
            }
        } else {
            out.push(char::from(b));
        }
    }
    Some(out)
}
