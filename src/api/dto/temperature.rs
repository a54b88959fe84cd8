//! DTOs for the temperature endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::TemperatureResult;

/// Request body for `POST /`.
///
/// A missing `cep` field decodes as an empty code, which then fails
/// validation like any other malformed code.
#[derive(Debug, Default, Deserialize)]
pub struct TemperatureRequest {
    #[serde(default)]
    pub cep: String,
}

/// Successful temperature lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureResponse {
    pub city: String,
    #[serde(rename = "temp_C")]
    pub temp_c: f64,
    #[serde(rename = "temp_F")]
    pub temp_f: f64,
    #[serde(rename = "temp_K")]
    pub temp_k: f64,
}

impl From<TemperatureResult> for TemperatureResponse {
    fn from(result: TemperatureResult) -> Self {
        Self {
            city: result.city,
            temp_c: result.temp_c,
            temp_f: result.temp_f,
            temp_k: result.temp_k,
        }
    }
}
