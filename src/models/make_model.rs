//! Make/model details of a technical-record version. All fields are optional
//! on the wire; the row is identified by its full attribute fingerprint.

use crate::error::ConvertError;
use dynamodb_types::DynamoDbImage;
use sql_params::{opt_string_param, SqlParam};

#[derive(Debug, Clone, PartialEq)]
pub struct MakeModel {
    pub make: Option<String>,
    pub model: Option<String>,
    pub chassis_make: Option<String>,
    pub chassis_model: Option<String>,
    pub body_make: Option<String>,
    pub body_model: Option<String>,
    pub model_literal: Option<String>,
    pub body_type_code: Option<String>,
    pub body_type_description: Option<String>,
    pub fuel_propulsion_system: Option<String>,
    pub dtp_code: Option<String>,
}

pub fn parse(tech_record: &DynamoDbImage) -> Result<MakeModel, ConvertError> {
    Ok(MakeModel {
        make: tech_record.opt_string("make")?,
        model: tech_record.opt_string("model")?,
        chassis_make: tech_record.opt_string("chassisMake")?,
        chassis_model: tech_record.opt_string("chassisModel")?,
        body_make: tech_record.opt_string("bodyMake")?,
        body_model: tech_record.opt_string("bodyModel")?,
        model_literal: tech_record.opt_string("modelLiteral")?,
        body_type_code: tech_record.opt_string("bodyTypeCode")?,
        body_type_description: tech_record.opt_string("bodyTypeDescription")?,
        fuel_propulsion_system: tech_record.opt_string("fuelPropulsionSystem")?,
        dtp_code: tech_record.opt_string("dtpCode")?,
    })
}

pub fn to_params(make_model: &MakeModel) -> Vec<SqlParam> {
    vec![
        opt_string_param("make", make_model.make.clone()),
        opt_string_param("model", make_model.model.clone()),
        opt_string_param("chassisMake", make_model.chassis_make.clone()),
        opt_string_param("chassisModel", make_model.chassis_model.clone()),
        opt_string_param("bodyMake", make_model.body_make.clone()),
        opt_string_param("bodyModel", make_model.body_model.clone()),
        opt_string_param("modelLiteral", make_model.model_literal.clone()),
        opt_string_param("bodyTypeCode", make_model.body_type_code.clone()),
        opt_string_param(
            "bodyTypeDescription",
            make_model.body_type_description.clone(),
        ),
        opt_string_param(
            "fuelPropulsionSystem",
            make_model.fuel_propulsion_system.clone(),
        ),
        opt_string_param("dtpCode", make_model.dtp_code.clone()),
    ]
}
