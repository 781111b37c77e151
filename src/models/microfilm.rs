//! Microfilm: an optional one-to-one child of the technical record.

use crate::error::ConvertError;
use dynamodb_types::DynamoDbImage;
use sql_params::{opt_string_param, SqlParam};

#[derive(Debug, Clone, PartialEq)]
pub struct Microfilm {
    pub microfilm_document_type: Option<String>,
    pub microfilm_roll_number: Option<String>,
    pub microfilm_serial_number: Option<String>,
}

/// The enclosing `microfilm` sub-document is itself optional; an absent
/// sub-document means no row at all.
pub fn parse(tech_record: &DynamoDbImage) -> Result<Option<Microfilm>, ConvertError> {
    let microfilm = match tech_record.opt_map("microfilm")? {
        Some(microfilm) => microfilm,
        None => return Ok(None),
    };

    Ok(Some(Microfilm {
        microfilm_document_type: microfilm.opt_string("microfilmDocumentType")?,
        microfilm_roll_number: microfilm.opt_string("microfilmRollNumber")?,
        microfilm_serial_number: microfilm.opt_string("microfilmSerialNumber")?,
    }))
}

pub fn to_params(microfilm: &Microfilm) -> Vec<SqlParam> {
    vec![
        opt_string_param(
            "microfilmDocumentType",
            microfilm.microfilm_document_type.clone(),
        ),
        opt_string_param("microfilmRollNumber", microfilm.microfilm_roll_number.clone()),
        opt_string_param(
            "microfilmSerialNumber",
            microfilm.microfilm_serial_number.clone(),
        ),
    ]
}
