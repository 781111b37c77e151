//! Axles: a one-to-many child of the technical record, one row per element
//! of the `axles` list, with nested weight and tyre groupings.

use crate::error::ConvertError;
use dynamodb_types::DynamoDbImage;
use sql_params::{integer_param, opt_boolean_param, opt_integer_param, opt_string_param, SqlParam};

#[derive(Debug, Clone, PartialEq)]
pub struct Axle {
    pub axle_number: f64,
    pub parking_brake_mrk: Option<bool>,
    pub weights: AxleWeights,
    pub tyres: AxleTyres,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxleWeights {
    pub kerb_weight: Option<f64>,
    pub laden_weight: Option<f64>,
    pub gb_weight: Option<f64>,
    pub eec_weight: Option<f64>,
    pub design_weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxleTyres {
    pub tyre_size: Option<String>,
    pub ply_rating: Option<String>,
    pub fitment_code: Option<String>,
    pub speed_category_symbol: Option<String>,
    pub tyre_code: Option<f64>,
}

pub fn parse(axle: &DynamoDbImage) -> Result<Axle, ConvertError> {
    let weights_image = axle.get_map("weights")?;
    let weights = AxleWeights {
        kerb_weight: weights_image.opt_number("kerbWeight")?,
        laden_weight: weights_image.opt_number("ladenWeight")?,
        gb_weight: weights_image.opt_number("gbWeight")?,
        eec_weight: weights_image.opt_number("eecWeight")?,
        design_weight: weights_image.opt_number("designWeight")?,
    };

    let tyres_image = axle.get_map("tyres")?;
    let tyres = AxleTyres {
        tyre_size: tyres_image.opt_string("tyreSize")?,
        ply_rating: tyres_image.opt_string("plyRating")?,
        fitment_code: tyres_image.opt_string("fitmentCode")?,
        speed_category_symbol: tyres_image.opt_string("speedCategorySymbol")?,
        tyre_code: tyres_image.opt_number("tyreCode")?,
    };

    Ok(Axle {
        axle_number: axle.get_number("axleNumber")?,
        parking_brake_mrk: axle.opt_bool("parkingBrakeMrk")?,
        weights,
        tyres,
    })
}

pub fn to_params(axle: &Axle) -> Vec<SqlParam> {
    vec![
        integer_param("axleNumber", axle.axle_number),
        opt_boolean_param("parkingBrakeMrk", axle.parking_brake_mrk),
        opt_integer_param("kerbWeight", axle.weights.kerb_weight),
        opt_integer_param("ladenWeight", axle.weights.laden_weight),
        opt_integer_param("gbWeight", axle.weights.gb_weight),
        opt_integer_param("eecWeight", axle.weights.eec_weight),
        opt_integer_param("designWeight", axle.weights.design_weight),
        opt_string_param("tyreSize", axle.tyres.tyre_size.clone()),
        opt_string_param("plyRating", axle.tyres.ply_rating.clone()),
        opt_string_param("fitmentCode", axle.tyres.fitment_code.clone()),
        opt_string_param("speedCategorySymbol", axle.tyres.speed_category_symbol.clone()),
        opt_integer_param("tyreCode", axle.tyres.tyre_code),
    ]
}
