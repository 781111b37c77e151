//! Identities: who created or last updated a technical-record version.
//!
//! Each version carries two identity pairs; both are independently upserted
//! by identity key.

use crate::error::ConvertError;
use dynamodb_types::DynamoDbImage;
use sql_params::{string_param, SqlParam};

#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub identity_id: String,
    pub name: String,
}

/// The created-by identity of a technical-record element.
pub fn parse_created_by(tech_record: &DynamoDbImage) -> Result<Identity, ConvertError> {
    Ok(Identity {
        identity_id: tech_record.get_string("createdById")?,
        name: tech_record.get_string("createdByName")?,
    })
}

/// The last-updated-by identity of a technical-record element.
pub fn parse_last_updated_by(tech_record: &DynamoDbImage) -> Result<Identity, ConvertError> {
    Ok(Identity {
        identity_id: tech_record.get_string("lastUpdatedById")?,
        name: tech_record.get_string("lastUpdatedByName")?,
    })
}

pub fn to_params(identity: &Identity) -> Vec<SqlParam> {
    vec![
        string_param("identityId", identity.identity_id.clone()),
        string_param("name", identity.name.clone()),
    ]
}

/// The lookup key for an already-known identity.
pub fn to_lookup_params(identity: &Identity) -> Vec<SqlParam> {
    vec![string_param("identityId", identity.identity_id.clone())]
}
