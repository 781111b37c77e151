//! Forward conversion: SqlValue → mysql_async::Value
//!
//! The tag on a [`SqlValue`] fully determines the wire representation:
//! booleans become 0/1 integers, text becomes bytes, and timestamps become
//! MySQL DATETIME components in UTC with microsecond precision.

use crate::SqlValue;
use chrono::{Datelike, Timelike};
use mysql_async::Value;

impl From<SqlValue> for Value {
    fn from(sv: SqlValue) -> Self {
        match sv {
            SqlValue::Null => Value::NULL,

            // Boolean - MySQL uses TINYINT(1)
            SqlValue::Bool(b) => Value::Int(if b { 1 } else { 0 }),

            SqlValue::Int(i) => Value::Int(i),
            SqlValue::Float(f) => Value::Double(f),
            SqlValue::Text(s) => Value::Bytes(s.into_bytes()),

            // DATETIME(6) - MySQL uses microseconds
            SqlValue::DateTime(dt) => Value::Date(
                dt.year() as u16,
                dt.month() as u8,
                dt.day() as u8,
                dt.hour() as u8,
                dt.minute() as u8,
                dt.second() as u8,
                dt.nanosecond() / 1000,
            ),
        }
    }
}
