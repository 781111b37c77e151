//! Plates: one row per element of the `plates` list.

use crate::error::ConvertError;
use crate::models::opt_timestamp;
use chrono::{DateTime, Utc};
use dynamodb_types::DynamoDbImage;
use sql_params::{opt_string_param, opt_timestamp_param, SqlParam};

#[derive(Debug, Clone, PartialEq)]
pub struct Plate {
    pub plate_serial_number: Option<String>,
    pub plate_issue_date: Option<DateTime<Utc>>,
    pub plate_reason_for_issue: Option<String>,
    pub plate_issuer: Option<String>,
}

pub fn parse(plate: &DynamoDbImage) -> Result<Plate, ConvertError> {
    Ok(Plate {
        plate_serial_number: plate.opt_string("plateSerialNumber")?,
        plate_issue_date: opt_timestamp(plate, "plateIssueDate")?,
        plate_reason_for_issue: plate.opt_string("plateReasonForIssue")?,
        plate_issuer: plate.opt_string("plateIssuer")?,
    })
}

pub fn to_params(plate: &Plate) -> Vec<SqlParam> {
    vec![
        opt_string_param("plateSerialNumber", plate.plate_serial_number.clone()),
        opt_timestamp_param("plateIssueDate", plate.plate_issue_date),
        opt_string_param("plateReasonForIssue", plate.plate_reason_for_issue.clone()),
        opt_string_param("plateIssuer", plate.plate_issuer.clone()),
    ]
}
