//! Vehicle class: the `vehicleClass` sub-document plus the class-related
//! scalars carried on the technical-record element itself.

use crate::error::ConvertError;
use dynamodb_types::DynamoDbImage;
use sql_params::{opt_string_param, string_param, SqlParam};

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleClass {
    pub code: String,
    pub description: Option<String>,
    pub vehicle_type: String,
    pub vehicle_size: Option<String>,
    pub vehicle_configuration: Option<String>,
    pub eu_vehicle_category: Option<String>,
}

pub fn parse(tech_record: &DynamoDbImage) -> Result<VehicleClass, ConvertError> {
    let class = tech_record.get_map("vehicleClass")?;

    Ok(VehicleClass {
        code: class.get_string("code")?,
        description: class.opt_string("description")?,
        vehicle_type: tech_record.get_string("vehicleType")?,
        vehicle_size: tech_record.opt_string("vehicleSize")?,
        vehicle_configuration: tech_record.opt_string("vehicleConfiguration")?,
        eu_vehicle_category: tech_record.opt_string("euVehicleCategory")?,
    })
}

pub fn to_params(vehicle_class: &VehicleClass) -> Vec<SqlParam> {
    vec![
        string_param("code", vehicle_class.code.clone()),
        opt_string_param("description", vehicle_class.description.clone()),
        string_param("vehicleType", vehicle_class.vehicle_type.clone()),
        opt_string_param("vehicleSize", vehicle_class.vehicle_size.clone()),
        opt_string_param(
            "vehicleConfiguration",
            vehicle_class.vehicle_configuration.clone(),
        ),
        opt_string_param("euVehicleCategory", vehicle_class.eu_vehicle_category.clone()),
    ]
}
