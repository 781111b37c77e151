//! PSV brakes: a one-to-one child of the technical record, with two nested
//! brake-force groupings.

use crate::error::ConvertError;
use dynamodb_types::DynamoDbImage;
use sql_params::{boolean_param, integer_param, string_param, SqlParam};

#[derive(Debug, Clone, PartialEq)]
pub struct Brakes {
    pub brake_code_original: String,
    pub brake_code: String,
    pub data_tr_brake_one: String,
    pub data_tr_brake_two: String,
    pub data_tr_brake_three: String,
    pub retarder_brake_one: RetarderBrakeType,
    pub retarder_brake_two: RetarderBrakeType,
    pub dtp_number: String,
    pub brake_force_wheels_not_locked: BrakeForceWheelsNotLocked,
    pub brake_force_wheels_up_to_half_locked: BrakeForceWheelsUpToHalfLocked,
    pub load_sensing_valve: bool,
    pub antilock_braking_system: bool,
}

/// Retarder brake kind.
///
/// The wire value is free text; anything outside the known set is preserved
/// in [`RetarderBrakeType::Unrecognized`] rather than silently mistyped.
/// Value-set validation beyond that is the caller's concern.
#[derive(Debug, Clone, PartialEq)]
pub enum RetarderBrakeType {
    Electric,
    Exhaust,
    Friction,
    Hydraulic,
    Other,
    None,
    Unrecognized(String),
}

impl RetarderBrakeType {
    pub fn from_wire(value: String) -> Self {
        match value.as_str() {
            "electric" => Self::Electric,
            "exhaust" => Self::Exhaust,
            "friction" => Self::Friction,
            "hydraulic" => Self::Hydraulic,
            "other" => Self::Other,
            "none" => Self::None,
            _ => Self::Unrecognized(value),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::Electric => "electric",
            Self::Exhaust => "exhaust",
            Self::Friction => "friction",
            Self::Hydraulic => "hydraulic",
            Self::Other => "other",
            Self::None => "none",
            Self::Unrecognized(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrakeForceWheelsNotLocked {
    pub service_brake_force_a: f64,
    pub secondary_brake_force_a: f64,
    pub parking_brake_force_a: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrakeForceWheelsUpToHalfLocked {
    pub service_brake_force_b: f64,
    pub secondary_brake_force_b: f64,
    pub parking_brake_force_b: f64,
}

pub fn parse(brakes: &DynamoDbImage) -> Result<Brakes, ConvertError> {
    let not_locked = brakes.get_map("brakeForceWheelsNotLocked")?;
    let brake_force_wheels_not_locked = BrakeForceWheelsNotLocked {
        service_brake_force_a: not_locked.get_number("serviceBrakeForceA")?,
        secondary_brake_force_a: not_locked.get_number("secondaryBrakeForceA")?,
        parking_brake_force_a: not_locked.get_number("parkingBrakeForceA")?,
    };

    let half_locked = brakes.get_map("brakeForceWheelsUpToHalfLocked")?;
    let brake_force_wheels_up_to_half_locked = BrakeForceWheelsUpToHalfLocked {
        service_brake_force_b: half_locked.get_number("serviceBrakeForceB")?,
        secondary_brake_force_b: half_locked.get_number("secondaryBrakeForceB")?,
        parking_brake_force_b: half_locked.get_number("parkingBrakeForceB")?,
    };

    Ok(Brakes {
        brake_code_original: brakes.get_string("brakeCodeOriginal")?,
        brake_code: brakes.get_string("brakeCode")?,
        data_tr_brake_one: brakes.get_string("dataTrBrakeOne")?,
        data_tr_brake_two: brakes.get_string("dataTrBrakeTwo")?,
        data_tr_brake_three: brakes.get_string("dataTrBrakeThree")?,
        retarder_brake_one: RetarderBrakeType::from_wire(brakes.get_string("retarderBrakeOne")?),
        retarder_brake_two: RetarderBrakeType::from_wire(brakes.get_string("retarderBrakeTwo")?),
        dtp_number: brakes.get_string("dtpNumber")?,
        brake_force_wheels_not_locked,
        brake_force_wheels_up_to_half_locked,
        load_sensing_valve: brakes.get_bool("loadSensingValve")?,
        antilock_braking_system: brakes.get_bool("antilockBrakingSystem")?,
    })
}

pub fn to_params(brakes: &Brakes) -> Vec<SqlParam> {
    vec![
        string_param("brakeCodeOriginal", brakes.brake_code_original.clone()),
        string_param("brakeCode", brakes.brake_code.clone()),
        string_param("dataTrBrakeOne", brakes.data_tr_brake_one.clone()),
        string_param("dataTrBrakeTwo", brakes.data_tr_brake_two.clone()),
        string_param("dataTrBrakeThree", brakes.data_tr_brake_three.clone()),
        string_param("retarderBrakeOne", brakes.retarder_brake_one.as_wire()),
        string_param("retarderBrakeTwo", brakes.retarder_brake_two.as_wire()),
        string_param("dtpNumber", brakes.dtp_number.clone()),
        boolean_param("loadSensingValve", brakes.load_sensing_valve),
        boolean_param("antilockBrakingSystem", brakes.antilock_braking_system),
        integer_param(
            "serviceBrakeForceA",
            brakes.brake_force_wheels_not_locked.service_brake_force_a,
        ),
        integer_param(
            "secondaryBrakeForceA",
            brakes.brake_force_wheels_not_locked.secondary_brake_force_a,
        ),
        integer_param(
            "parkingBrakeForceA",
            brakes.brake_force_wheels_not_locked.parking_brake_force_a,
        ),
        integer_param(
            "serviceBrakeForceB",
            brakes
                .brake_force_wheels_up_to_half_locked
                .service_brake_force_b,
        ),
        integer_param(
            "secondaryBrakeForceB",
            brakes
                .brake_force_wheels_up_to_half_locked
                .secondary_brake_force_b,
        ),
        integer_param(
            "parkingBrakeForceB",
            brakes
                .brake_force_wheels_up_to_half_locked
                .parking_brake_force_b,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::assert_param_names;
    use dynamodb_types::DocumentError;
    use serde_json::json;
    use sql_params::SqlValue;

    fn brakes_json() -> serde_json::Value {
        json!({
            "brakeCodeOriginal": {"S": "333"},
            "brakeCode": {"S": "BRAKE-CODE"},
            "dataTrBrakeOne": {"S": "None"},
            "dataTrBrakeTwo": {"S": "None"},
            "dataTrBrakeThree": {"S": "None"},
            "retarderBrakeOne": {"S": "electric"},
            "retarderBrakeTwo": {"S": "exhaust"},
            "dtpNumber": {"S": "DTP-NUMBER"},
            "loadSensingValve": {"BOOL": true},
            "antilockBrakingSystem": {"BOOL": false},
            "brakeForceWheelsNotLocked": {"M": {
                "serviceBrakeForceA": {"N": "100"},
                "secondaryBrakeForceA": {"N": "200"},
                "parkingBrakeForceA": {"N": "300"}
            }},
            "brakeForceWheelsUpToHalfLocked": {"M": {
                "serviceBrakeForceB": {"N": "400"},
                "secondaryBrakeForceB": {"N": "500"},
                "parkingBrakeForceB": {"N": "600"}
            }}
        })
    }

    #[test]
    fn test_parse_and_param_names() {
        let image = DynamoDbImage::from_json(&brakes_json()).unwrap();
        let brakes = parse(&image).unwrap();

        assert_eq!(brakes.brake_code_original, "333");
        assert_eq!(brakes.retarder_brake_one, RetarderBrakeType::Electric);
        assert_eq!(
            brakes.brake_force_wheels_not_locked.parking_brake_force_a,
            300.0
        );

        assert_param_names(
            &to_params(&brakes),
            &[
                "brakeCodeOriginal",
                "brakeCode",
                "dataTrBrakeOne",
                "dataTrBrakeTwo",
                "dataTrBrakeThree",
                "retarderBrakeOne",
                "retarderBrakeTwo",
                "dtpNumber",
                "loadSensingValve",
                "antilockBrakingSystem",
                "serviceBrakeForceA",
                "secondaryBrakeForceA",
                "parkingBrakeForceA",
                "serviceBrakeForceB",
                "secondaryBrakeForceB",
                "parkingBrakeForceB",
            ],
        );
    }

    #[test]
    fn test_brake_forces_are_tagged_integer() {
        let image = DynamoDbImage::from_json(&brakes_json()).unwrap();
        let params = to_params(&parse(&image).unwrap());
        let force = params
            .iter()
            .find(|p| p.name == "serviceBrakeForceA")
            .unwrap();
        assert_eq!(force.value, SqlValue::Int(100));
    }

    #[test]
    fn test_missing_required_field() {
        let mut raw = brakes_json();
        raw.as_object_mut().unwrap().remove("brakeCode");
        let image = DynamoDbImage::from_json(&raw).unwrap();

        match parse(&image).unwrap_err() {
            ConvertError::Document(DocumentError::MissingField(field)) => {
                assert_eq!(field, "brakeCode");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unrecognized_retarder_type_is_preserved() {
        let retarder = RetarderBrakeType::from_wire("magnetic".to_string());
        assert_eq!(
            retarder,
            RetarderBrakeType::Unrecognized("magnetic".to_string())
        );
        assert_eq!(retarder.as_wire(), "magnetic");
    }
}
