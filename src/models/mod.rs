//! Entity parsers: one module per relational concept.
//!
//! Each parser is a pure pair of functions on a decoded document image:
//! `parse` produces a typed record (failing fast on missing or mis-typed
//! required fields), and `to_params` emits exactly the named parameter set
//! expected by the corresponding insert statement. Foreign-key parameters
//! are bound by the orchestrator, not by the parsers.

pub mod axle_spacing;
pub mod axles;
pub mod brakes;
pub mod contact_details;
pub mod identity;
pub mod make_model;
pub mod microfilm;
pub mod plates;
pub mod tech_record;
pub mod tech_record_document;
pub mod vehicle_class;

use crate::error::ConvertError;
use chrono::{DateTime, Utc};
use dynamodb_types::DynamoDbImage;

/// Parse ISO-8601 timestamp text into a UTC instant.
pub(crate) fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, ConvertError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ConvertError::InvalidTimestamp {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Read a required timestamp field.
pub(crate) fn get_timestamp(
    image: &DynamoDbImage,
    field: &str,
) -> Result<DateTime<Utc>, ConvertError> {
    let text = image.get_string(field)?;
    parse_timestamp(field, &text)
}

/// Read an optional timestamp field; absent reads as `None`, present but
/// unparseable is still an error.
pub(crate) fn opt_timestamp(
    image: &DynamoDbImage,
    field: &str,
) -> Result<Option<DateTime<Utc>>, ConvertError> {
    match image.opt_string(field)? {
        Some(text) => parse_timestamp(field, &text).map(Some),
        None => Ok(None),
    }
}
