//! Handlers for the temperature endpoints.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use tracing::debug;

use crate::api::dto::temperature::{TemperatureRequest, TemperatureResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the current temperature of the city a postal code belongs to.
///
/// # Endpoint
///
/// `GET /temperatura/{cep}`
///
/// # Response Codes
///
/// - **200 OK**: `{"city", "temp_C", "temp_F", "temp_K"}`
/// - **422 Unprocessable Entity**: `invalid zipcode`
/// - **404 Not Found**: `can not find zipcode`
/// - **500 Internal Server Error**: the request was cancelled
pub async fn temperature_by_path_handler(
    Path(cep): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<TemperatureResponse>, AppError> {
    lookup(&state, &cep).await
}

/// Same as [`temperature_by_path_handler`] with the code in a JSON body.
///
/// # Endpoint
///
/// `POST /` with `{"cep": "<code>"}`
///
/// An empty body counts as an empty code (422). A body that is not valid
/// JSON is rejected with 400.
pub async fn temperature_by_body_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TemperatureResponse>, AppError> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        TemperatureRequest::default()
    } else {
        serde_json::from_slice::<TemperatureRequest>(&body).map_err(|e| {
            debug!(error = %e, "Rejected malformed request body");
            AppError::bad_request(format!("invalid request body: {e}"))
        })?
    };

    lookup(&state, &request.cep).await
}

async fn lookup(state: &AppState, cep: &str) -> Result<Json<TemperatureResponse>, AppError> {
    let cancel = state.request_token();

    let result = state.temperature_service.execute(cep, &cancel).await?;

    Ok(Json(result.into()))
}
