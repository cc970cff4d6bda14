//! Scalar coercion shared by the typed accessors and the binder.
//!
//! Parsing is locale-independent and base-10. Both layers go through
//! [`Kind::parse`], so a value bound into a struct field is always equal to
//! what the matching `get_*` accessor returns for the same raw string.

use std::fmt;

use crate::error::ChainfigError;

/// The primitive kinds a raw config string can be coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Int,
    Int64,
    Bool,
    Float64,
}

impl Kind {
    /// Type name reported in [`ChainfigError::WrongType`].
    pub fn type_name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Int64 => "int64",
            Kind::Bool => "bool",
            Kind::Float64 => "float64",
        }
    }

    /// Coerce `raw` into this kind. `key` is only used for the error.
    pub fn parse(self, key: &str, raw: &str) -> Result<Value, ChainfigError> {
        let parsed = match self {
            Kind::String => Some(Value::String(raw.to_string())),
            Kind::Int => raw.parse().ok().map(Value::Int),
            Kind::Int64 => raw.parse().ok().map(Value::Int64),
            Kind::Bool => parse_bool(raw).map(Value::Bool),
            Kind::Float64 => raw.parse().ok().map(Value::Float64),
        };
        parsed.ok_or_else(|| ChainfigError::WrongType {
            key: key.to_string(),
            value: raw.to_string(),
            expected: self.type_name(),
        })
    }
}

/// Render a float so it never reads as an integer: `3` becomes `3.0`.
///
/// `Display` for floats never uses exponent notation, so a rendering made only
/// of digits and a sign is a whole number. `inf` and `NaN` pass through.
pub(crate) fn float_literal(f: impl fmt::Display) -> String {
    let text = f.to_string();
    if text.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        format!("{text}.0")
    } else {
        text
    }
}

/// A coerced scalar, handed to field setters by the binder.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i32),
    Int64(i64),
    Bool(bool),
    Float64(f64),
}

/// A Rust type that a config string can be coerced into.
///
/// Implemented for exactly the supported primitives. Generated field setters
/// use [`Scalar::from_value`] to unpack the [`Value`] the binder produced.
pub trait Scalar: Sized {
    const KIND: Kind;

    fn from_value(value: Value) -> Option<Self>;

    fn parse(key: &str, raw: &str) -> Result<Self, ChainfigError> {
        let value = Self::KIND.parse(key, raw)?;
        Self::from_value(value).ok_or_else(|| ChainfigError::WrongType {
            key: key.to_string(),
            value: raw.to_string(),
            expected: Self::KIND.type_name(),
        })
    }
}

impl Scalar for String {
    const KIND: Kind = Kind::String;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Scalar for i32 {
    const KIND: Kind = Kind::Int;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }
}

impl Scalar for i64 {
    const KIND: Kind = Kind::Int64;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int64(i) => Some(i),
            _ => None,
        }
    }
}

impl Scalar for bool {
    const KIND: Kind = Kind::Bool;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl Scalar for f64 {
    const KIND: Kind = Kind::Float64;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float64(f) => Some(f),
            _ => None,
        }
    }
}

/// Accepts the canonical boolean spellings and nothing else.
fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
