//! Reverse conversion: MySQL result values → [`SqlValue`].
//!
//! Lookup statements read rows back from the target, so result cells must
//! come back through the same tagged representation the parameters go out
//! as. Schema-dependent MySQL types this crate never writes (TIME, JSON,
//! spatial) are rejected rather than guessed at.

use chrono::{TimeZone, Utc};
use mysql_async::Value;
use thiserror::Error;

use crate::SqlValue;

/// Error during MySQL result value conversion.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Unsupported MySQL value: {0:?}")]
    UnsupportedValue(Value),
    #[error("Invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("Invalid date/time value")]
    InvalidDateTime,
}

impl TryFrom<Value> for SqlValue {
    type Error = ConversionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::NULL => Ok(SqlValue::Null),
            Value::Int(i) => Ok(SqlValue::Int(i)),
            Value::UInt(u) => Ok(SqlValue::Int(u as i64)),
            Value::Float(f) => Ok(SqlValue::Float(f as f64)),
            Value::Double(d) => Ok(SqlValue::Float(d)),
            Value::Bytes(bytes) => Ok(SqlValue::Text(String::from_utf8(bytes)?)),
            Value::Date(year, month, day, hour, minute, second, micros) => Utc
                .with_ymd_and_hms(
                    i32::from(year),
                    u32::from(month),
                    u32::from(day),
                    u32::from(hour),
                    u32::from(minute),
                    u32::from(second),
                )
                .single()
                .and_then(|dt| dt.checked_add_signed(chrono::Duration::microseconds(micros as i64)))
                .map(SqlValue::DateTime)
                .ok_or(ConversionError::InvalidDateTime),
            other => Err(ConversionError::UnsupportedValue(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_round_trip() {
        assert_eq!(SqlValue::try_from(Value::Int(42)).unwrap(), SqlValue::Int(42));
        assert_eq!(
            SqlValue::try_from(Value::UInt(7)).unwrap(),
            SqlValue::Int(7)
        );
    }

    #[test]
    fn test_bytes_become_text() {
        let v = SqlValue::try_from(Value::Bytes(b"SYSTEM-NUMBER".to_vec())).unwrap();
        assert_eq!(v, SqlValue::Text("SYSTEM-NUMBER".to_string()));
    }

    #[test]
    fn test_date_becomes_utc_datetime() {
        let v = SqlValue::try_from(Value::Date(2020, 1, 1, 12, 30, 0, 500_000)).unwrap();
        let dt = v.as_datetime().unwrap();
        assert_eq!(dt.to_rfc3339(), "2020-01-01T12:30:00.500000+00:00");
    }

    #[test]
    fn test_null_and_unsupported() {
        assert!(SqlValue::try_from(Value::NULL).unwrap().is_null());
        assert!(SqlValue::try_from(Value::Time(false, 0, 1, 2, 3, 0)).is_err());
    }
}
