//! The technical record itself: the scalar fields of one historical version.
//!
//! Every change event produces a new version row, so this entity is
//! always-insert. Foreign keys to the vehicle, make/model, class, identities
//! and contact details are bound by the orchestrator.

use crate::error::ConvertError;
use crate::models::{get_timestamp, opt_timestamp};
use chrono::{DateTime, Utc};
use dynamodb_types::DynamoDbImage;
use sql_params::{
    opt_boolean_param, opt_integer_param, opt_string_param, opt_timestamp_param, timestamp_param,
    SqlParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TechRecord {
    pub created_at: DateTime<Utc>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub function_code: Option<String>,
    pub off_road: Option<bool>,
    pub number_of_wheels_driven: Option<f64>,
    pub emissions_limit: Option<String>,
    pub departmental_vehicle_marker: Option<bool>,
    pub alteration_marker: Option<bool>,
    pub variant_version_number: Option<String>,
    pub gross_eec_weight: Option<f64>,
    pub train_eec_weight: Option<f64>,
    pub max_train_eec_weight: Option<f64>,
    pub manufacture_year: Option<f64>,
    pub regn_date: Option<DateTime<Utc>>,
    pub first_use_date: Option<DateTime<Utc>>,
    pub coif_date: Option<DateTime<Utc>>,
    pub nta_number: Option<String>,
    pub conversion_ref_no: Option<String>,
    pub seats_lower_deck: Option<f64>,
    pub seats_upper_deck: Option<f64>,
    pub standing_capacity: Option<f64>,
    pub speed_restriction: Option<f64>,
    pub speed_limiter_mrk: Option<bool>,
    pub tacho_exempt_mrk: Option<bool>,
    pub dispensations: Option<String>,
    pub remarks: Option<String>,
    pub reason_for_creation: Option<String>,
    pub status_code: Option<String>,
    pub unladen_weight: Option<f64>,
    pub gross_kerb_weight: Option<f64>,
    pub gross_laden_weight: Option<f64>,
    pub gross_gb_weight: Option<f64>,
    pub gross_design_weight: Option<f64>,
    pub no_of_axles: Option<f64>,
    pub brake_code: Option<String>,
    pub number_of_seatbelts: Option<String>,
    pub seatbelt_installation_approval_date: Option<DateTime<Utc>>,
}

pub fn parse(tech_record: &DynamoDbImage) -> Result<TechRecord, ConvertError> {
    Ok(TechRecord {
        created_at: get_timestamp(tech_record, "createdAt")?,
        last_updated_at: opt_timestamp(tech_record, "lastUpdatedAt")?,
        function_code: tech_record.opt_string("functionCode")?,
        off_road: tech_record.opt_bool("offRoad")?,
        number_of_wheels_driven: tech_record.opt_number("numberOfWheelsDriven")?,
        emissions_limit: tech_record.opt_string("emissionsLimit")?,
        departmental_vehicle_marker: tech_record.opt_bool("departmentalVehicleMarker")?,
        alteration_marker: tech_record.opt_bool("alterationMarker")?,
        variant_version_number: tech_record.opt_string("variantVersionNumber")?,
        gross_eec_weight: tech_record.opt_number("grossEecWeight")?,
        train_eec_weight: tech_record.opt_number("trainEecWeight")?,
        max_train_eec_weight: tech_record.opt_number("maxTrainEecWeight")?,
        manufacture_year: tech_record.opt_number("manufactureYear")?,
        regn_date: opt_timestamp(tech_record, "regnDate")?,
        first_use_date: opt_timestamp(tech_record, "firstUseDate")?,
        coif_date: opt_timestamp(tech_record, "coifDate")?,
        nta_number: tech_record.opt_string("ntaNumber")?,
        conversion_ref_no: tech_record.opt_string("conversionRefNo")?,
        seats_lower_deck: tech_record.opt_number("seatsLowerDeck")?,
        seats_upper_deck: tech_record.opt_number("seatsUpperDeck")?,
        standing_capacity: tech_record.opt_number("standingCapacity")?,
        speed_restriction: tech_record.opt_number("speedRestriction")?,
        speed_limiter_mrk: tech_record.opt_bool("speedLimiterMrk")?,
        tacho_exempt_mrk: tech_record.opt_bool("tachoExemptMrk")?,
        dispensations: tech_record.opt_string("dispensations")?,
        remarks: tech_record.opt_string("remarks")?,
        reason_for_creation: tech_record.opt_string("reasonForCreation")?,
        status_code: tech_record.opt_string("statusCode")?,
        unladen_weight: tech_record.opt_number("unladenWeight")?,
        gross_kerb_weight: tech_record.opt_number("grossKerbWeight")?,
        gross_laden_weight: tech_record.opt_number("grossLadenWeight")?,
        gross_gb_weight: tech_record.opt_number("grossGbWeight")?,
        gross_design_weight: tech_record.opt_number("grossDesignWeight")?,
        no_of_axles: tech_record.opt_number("noOfAxles")?,
        brake_code: tech_record.opt_string("brakeCode")?,
        number_of_seatbelts: tech_record.opt_string("numberOfSeatbelts")?,
        seatbelt_installation_approval_date: opt_timestamp(
            tech_record,
            "seatbeltInstallationApprovalDate",
        )?,
    })
}

pub fn to_params(record: &TechRecord) -> Vec<SqlParam> {
    vec![
        timestamp_param("createdAt", record.created_at),
        opt_timestamp_param("lastUpdatedAt", record.last_updated_at),
        opt_string_param("functionCode", record.function_code.clone()),
        opt_boolean_param("offRoad", record.off_road),
        opt_integer_param("numberOfWheelsDriven", record.number_of_wheels_driven),
        opt_string_param("emissionsLimit", record.emissions_limit.clone()),
        opt_boolean_param(
            "departmentalVehicleMarker",
            record.departmental_vehicle_marker,
        ),
        opt_boolean_param("alterationMarker", record.alteration_marker),
        opt_string_param("variantVersionNumber", record.variant_version_number.clone()),
        opt_integer_param("grossEecWeight", record.gross_eec_weight),
        opt_integer_param("trainEecWeight", record.train_eec_weight),
        opt_integer_param("maxTrainEecWeight", record.max_train_eec_weight),
        opt_integer_param("manufactureYear", record.manufacture_year),
        opt_timestamp_param("regnDate", record.regn_date),
        opt_timestamp_param("firstUseDate", record.first_use_date),
        opt_timestamp_param("coifDate", record.coif_date),
        opt_string_param("ntaNumber", record.nta_number.clone()),
        opt_string_param("conversionRefNo", record.conversion_ref_no.clone()),
        opt_integer_param("seatsLowerDeck", record.seats_lower_deck),
        opt_integer_param("seatsUpperDeck", record.seats_upper_deck),
        opt_integer_param("standingCapacity", record.standing_capacity),
        opt_integer_param("speedRestriction", record.speed_restriction),
        opt_boolean_param("speedLimiterMrk", record.speed_limiter_mrk),
        opt_boolean_param("tachoExemptMrk", record.tacho_exempt_mrk),
        opt_string_param("dispensations", record.dispensations.clone()),
        opt_string_param("remarks", record.remarks.clone()),
        opt_string_param("reasonForCreation", record.reason_for_creation.clone()),
        opt_string_param("statusCode", record.status_code.clone()),
        opt_integer_param("unladenWeight", record.unladen_weight),
        opt_integer_param("grossKerbWeight", record.gross_kerb_weight),
        opt_integer_param("grossLadenWeight", record.gross_laden_weight),
        opt_integer_param("grossGbWeight", record.gross_gb_weight),
        opt_integer_param("grossDesignWeight", record.gross_design_weight),
        opt_integer_param("noOfAxles", record.no_of_axles),
        opt_string_param("brakeCode", record.brake_code.clone()),
        opt_string_param("numberOfSeatbelts", record.number_of_seatbelts.clone()),
        opt_timestamp_param(
            "seatbeltInstallationApprovalDate",
            record.seatbelt_installation_approval_date,
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

    fn record_json() -> serde_json::Value {
        json!({
            "createdAt": {"S": "2020-01-01T00:00:00.000Z"},
            "offRoad": {"BOOL": true},
            "numberOfWheelsDriven": {"N": "1"},
            "regnDate": {"S": "2020-01-01T00:00:00.000Z"},
            "statusCode": {"S": "current"},
        })
    }

    #[test]
    fn test_parse_mixed_field_types() {
        let image = DynamoDbImage::from_json(&record_json()).unwrap();
        let record = parse(&image).unwrap();

        assert_eq!(record.created_at.to_rfc3339(), "2020-01-01T00:00:00+00:00");
        assert_eq!(record.off_road, Some(true));
        assert_eq!(record.number_of_wheels_driven, Some(1.0));
        assert_eq!(record.status_code.as_deref(), Some("current"));
        assert_eq!(record.manufacture_year, None);
    }

    #[test]
    fn test_param_names_match_column_set() {
        let image = DynamoDbImage::from_json(&record_json()).unwrap();
        let params = to_params(&parse(&image).unwrap());

        assert_param_names(
            &params,
            &[
                "createdAt",
                "lastUpdatedAt",
                "functionCode",
                "offRoad",
                "numberOfWheelsDriven",
                "emissionsLimit",
                "departmentalVehicleMarker",
                "alterationMarker",
                "variantVersionNumber",
                "grossEecWeight",
                "trainEecWeight",
                "maxTrainEecWeight",
                "manufactureYear",
                "regnDate",
                "firstUseDate",
                "coifDate",
                "ntaNumber",
                "conversionRefNo",
                "seatsLowerDeck",
                "seatsUpperDeck",
                "standingCapacity",
                "speedRestriction",
                "speedLimiterMrk",
                "tachoExemptMrk",
                "dispensations",
                "remarks",
                "reasonForCreation",
                "statusCode",
                "unladenWeight",
                "grossKerbWeight",
                "grossLadenWeight",
                "grossGbWeight",
                "grossDesignWeight",
                "noOfAxles",
                "brakeCode",
                "numberOfSeatbelts",
                "seatbeltInstallationApprovalDate",
            ],
        );
    }

    #[test]
    fn test_wheels_driven_is_tagged_integer() {
        let image = DynamoDbImage::from_json(&record_json()).unwrap();
        let params = to_params(&parse(&image).unwrap());
        let wheels = params
            .iter()
            .find(|p| p.name == "numberOfWheelsDriven")
            .unwrap();
        assert_eq!(wheels.value, SqlValue::Int(1));
    }

    #[test]
    fn test_missing_created_at_fails() {
        let image = DynamoDbImage::from_json(&json!({"statusCode": {"S": "current"}})).unwrap();
        assert!(matches!(
            parse(&image).unwrap_err(),
            ConvertError::Document(DocumentError::MissingField(ref f)) if f == "createdAt"
        ));
    }

    #[test]
    fn test_invalid_timestamp_text_fails() {
        let image =
            DynamoDbImage::from_json(&json!({"createdAt": {"S": "yesterday"}})).unwrap();
        assert!(matches!(
            parse(&image).unwrap_err(),
            ConvertError::InvalidTimestamp { ref field, .. } if field == "createdAt"
        ));
    }
}
