//! Error responses and request body extraction

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hbnb_core::HbnbError;
use hbnb_types::runtime::ErrorResponse;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

/// Handler error; renders as `{"error": "<message>"}` with the mapped status
#[derive(Debug)]
pub struct ApiError(pub HbnbError);

/// Result type returned by handlers
pub type ApiResult<T> = Result<T, ApiError>;

impl From<HbnbError> for ApiError {
    fn from(err: HbnbError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if err.is_error() {
            error!("Request failed: {}", err);
        } else if err.is_client_error() {
            debug!("Request rejected: {}", err);
        } else {
            warn!("Request failed: {}", err);
        }

        (status, Json(ErrorResponse::new(err.sanitized_message()))).into_response()
    }
}

/// Accept only a JSON object body; anything else is "Not a JSON"
pub fn json_object(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Map<String, Value>, HbnbError> {
    match body {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(Json(other)) => {
            debug!("Rejected non-object JSON body: {}", other);
            Err(HbnbError::NotJson)
        }
        Err(rejection) => {
            debug!("Rejected body: {}", rejection.body_text());
            Err(HbnbError::NotJson)
        }
    }
}
