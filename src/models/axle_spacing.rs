//! Axle spacing: one row per element of `dimensions.axleSpacing`.

use crate::error::ConvertError;
use dynamodb_types::DynamoDbImage;
use sql_params::{opt_integer_param, string_param, SqlParam};

#[derive(Debug, Clone, PartialEq)]
pub struct AxleSpacing {
    /// Which axle pair the spacing describes, e.g. `"1-2"`.
    pub axles: String,
    /// Spacing in millimetres.
    pub value: Option<f64>,
}

pub fn parse(spacing: &DynamoDbImage) -> Result<AxleSpacing, ConvertError> {
    Ok(AxleSpacing {
        axles: spacing.get_string("axles")?,
        value: spacing.opt_number("value")?,
    })
}

pub fn to_params(spacing: &AxleSpacing) -> Vec<SqlParam> {
    vec![
        string_param("axles", spacing.axles.clone()),
        opt_integer_param("value", spacing.value),
    ]
}
