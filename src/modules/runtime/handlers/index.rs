//! Status, stats and fallback handlers

use axum::{extract::State, Json};
use hbnb_core::HbnbError;
use hbnb_types::{runtime::StatusResponse, Kind};
use serde_json::{Map, Value};

use super::error::{ApiError, ApiResult};
use crate::state::AppState;

/// `{"amenities": n, "cities": n, ...}` keyed by collection name
pub fn counts_json(counts: &[(Kind, usize)]) -> Value {
    let map: Map<String, Value> = counts
        .iter()
        .map(|(kind, count)| (kind.collection().to_string(), Value::from(*count)))
        .collect();
    Value::Object(map)
}

/// Handler for the service status endpoints
pub struct IndexHandler;

impl IndexHandler {
    /// Handle GET /status
    pub async fn status() -> Json<StatusResponse> {
        Json(StatusResponse::ok())
    }

    /// Handle GET /stats
    pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<Value>> {
        let counts = state.storage.as_ref().counts().await?;
        Ok(Json(counts_json(&counts)))
    }

    /// Fallback for unmatched routes
    pub async fn not_found() -> ApiError {
        ApiError(HbnbError::NotFound)
    }
}
