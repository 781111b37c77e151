//! Typed SQL parameter construction for techrecord-sync.
//!
//! A [`SqlParam`] is a (name, tagged value) pair; the tag fully determines
//! how the execution layer serializes the value. The constructors here are
//! the only way entity parsers produce parameters, which keeps the tagging
//! rules in one place: booleans become 0/1 integers, numbers destined for
//! integer columns are truncated rather than shipped as floats, and
//! timestamps are always UTC and tagged distinctly from plain text.
//!
//! # Structure
//!
//! - `forward`: Convert [`SqlValue`] → `mysql_async::Value` (for statement
//!   execution against a MySQL-compatible target)
//! - `reverse`: Convert `mysql_async::Value` → [`SqlValue`] (for reading
//!   lookup results back)

use chrono::{DateTime, Utc};

pub mod forward;
pub mod reverse;

/// A tagged SQL parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(DateTime<Utc>),
}

impl SqlValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as an i64.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as a DateTime.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

/// A named, typed SQL parameter.
///
/// Parameters are positionally independent; the name must match a named
/// placeholder in the target statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlParam {
    pub name: String,
    pub value: SqlValue,
}

impl SqlParam {
    pub fn new(name: impl Into<String>, value: SqlValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Create a text parameter.
pub fn string_param(name: impl Into<String>, value: impl Into<String>) -> SqlParam {
    SqlParam::new(name, SqlValue::Text(value.into()))
}

/// Create a nullable text parameter.
pub fn opt_string_param(name: impl Into<String>, value: Option<String>) -> SqlParam {
    match value {
        Some(s) => string_param(name, s),
        None => null_param(name),
    }
}

/// Create an integer parameter from a wire number, truncating toward zero.
///
/// The wire format carries all numbers as decimals; values bound to integer
/// columns must be tagged integer to avoid precision drift in the execution
/// layer.
pub fn integer_param(name: impl Into<String>, value: f64) -> SqlParam {
    SqlParam::new(name, SqlValue::Int(value.trunc() as i64))
}

/// Create a nullable integer parameter from a wire number.
pub fn opt_integer_param(name: impl Into<String>, value: Option<f64>) -> SqlParam {
    match value {
        Some(n) => integer_param(name, n),
        None => null_param(name),
    }
}

/// Create a floating-point parameter.
pub fn float_param(name: impl Into<String>, value: f64) -> SqlParam {
    SqlParam::new(name, SqlValue::Float(value))
}

/// Create a boolean parameter.
pub fn boolean_param(name: impl Into<String>, value: bool) -> SqlParam {
    SqlParam::new(name, SqlValue::Bool(value))
}

/// Create a nullable boolean parameter.
pub fn opt_boolean_param(name: impl Into<String>, value: Option<bool>) -> SqlParam {
    match value {
        Some(b) => boolean_param(name, b),
        None => null_param(name),
    }
}

/// Create a UTC timestamp parameter.
pub fn timestamp_param(name: impl Into<String>, value: DateTime<Utc>) -> SqlParam {
    SqlParam::new(name, SqlValue::DateTime(value))
}

/// Create a nullable UTC timestamp parameter.
pub fn opt_timestamp_param(name: impl Into<String>, value: Option<DateTime<Utc>>) -> SqlParam {
    match value {
        Some(dt) => timestamp_param(name, dt),
        None => null_param(name),
    }
}

/// Create an explicitly null parameter.
pub fn null_param(name: impl Into<String>) -> SqlParam {
    SqlParam::new(name, SqlValue::Null)
}
