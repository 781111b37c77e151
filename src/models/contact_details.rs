//! Contact details: an optional enclosing sub-document with optional
//! interior fields.
//!
//! The two levels of optionality are distinct: an absent `applicantDetails`
//! sub-document means no contact row and no foreign key at all (the parser
//! returns `None`), while a present sub-document with absent interior fields
//! produces a row of nulls.

use crate::error::ConvertError;
use dynamodb_types::DynamoDbImage;
use sql_params::{opt_string_param, SqlParam};

#[derive(Debug, Clone, PartialEq)]
pub struct ContactDetails {
    pub name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub post_town: Option<String>,
    pub address3: Option<String>,
    pub post_code: Option<String>,
    pub email_address: Option<String>,
    pub telephone_number: Option<String>,
    pub fax_number: Option<String>,
}

pub fn parse(tech_record: &DynamoDbImage) -> Result<Option<ContactDetails>, ConvertError> {
    let details = match tech_record.opt_map("applicantDetails")? {
        Some(details) => details,
        None => return Ok(None),
    };

    Ok(Some(ContactDetails {
        name: details.opt_string("name")?,
        address1: details.opt_string("address1")?,
        address2: details.opt_string("address2")?,
        post_town: details.opt_string("postTown")?,
        address3: details.opt_string("address3")?,
        post_code: details.opt_string("postCode")?,
        email_address: details.opt_string("emailAddress")?,
        telephone_number: details.opt_string("telephoneNumber")?,
        fax_number: details.opt_string("faxNumber")?,
    }))
}

pub fn to_params(details: &ContactDetails) -> Vec<SqlParam> {
    vec![
        opt_string_param("name", details.name.clone()),
        opt_string_param("address1", details.address1.clone()),
        opt_string_param("address2", details.address2.clone()),
        opt_string_param("postTown", details.post_town.clone()),
        opt_string_param("address3", details.address3.clone()),
        opt_string_param("postCode", details.post_code.clone()),
        opt_string_param("emailAddress", details.email_address.clone()),
        opt_string_param("telephoneNumber", details.telephone_number.clone()),
        opt_string_param("faxNumber", details.fax_number.clone()),
    ]
}
