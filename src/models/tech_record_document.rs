//! The top-level technical-record document: vehicle identity fields plus a
//! list of technical-record versions.

use crate::error::ConvertError;
use dynamodb_types::DynamoDbImage;
use sql_params::{opt_string_param, string_param, SqlParam};

#[derive(Debug, Clone, PartialEq)]
pub struct TechRecordDocument {
    pub system_number: String,
    pub vin: String,
    pub vrm_trm: Option<String>,
    pub trailer_id: Option<String>,
    /// One sub-document per technical-record version; may be empty.
    pub tech_records: Vec<DynamoDbImage>,
}

pub fn parse(image: &DynamoDbImage) -> Result<TechRecordDocument, ConvertError> {
    let mut tech_records = Vec::new();
    if let Some(elements) = image.opt_list("techRecord")? {
        for element in elements {
            tech_records.push(element.expect_map("techRecord")?.clone());
        }
    }

    Ok(TechRecordDocument {
        system_number: image.get_string("systemNumber")?,
        vin: image.get_string("vin")?,
        vrm_trm: image.opt_string("primaryVrm")?,
        trailer_id: image.opt_string("trailerId")?,
        tech_records,
    })
}

/// Parameters for the vehicle row this document describes.
pub fn to_vehicle_params(document: &TechRecordDocument) -> Vec<SqlParam> {
    vec![
        string_param("systemNumber", document.system_number.clone()),
        string_param("vin", document.vin.clone()),
        opt_string_param("vrmTrm", document.vrm_trm.clone()),
        opt_string_param("trailerId", document.trailer_id.clone()),
    ]
}

/// The vehicle's natural-key lookup parameters.
pub fn to_vehicle_lookup_params(document: &TechRecordDocument) -> Vec<SqlParam> {
    vec![string_param("systemNumber", document.system_number.clone())]
}
