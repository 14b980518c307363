//! Place search handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use hbnb_core::{Entity, HbnbError};
use hbnb_types::runtime::PlacesSearchRequest;
use serde_json::Value;
use tracing::{debug, info};

use super::error::{json_object, ApiResult};
use crate::search::places_search;
use crate::state::AppState;

/// Handler for place search requests
pub struct SearchHandler;

impl SearchHandler {
    /// Handle POST /places_search
    pub async fn search(
        State(state): State<AppState>,
        body: Result<Json<Value>, JsonRejection>,
    ) -> ApiResult<Json<Value>> {
        let body = json_object(body)?;
        let request: PlacesSearchRequest =
            serde_json::from_value(Value::Object(body)).map_err(|e| {
                debug!("Rejected search criteria: {}", e);
                HbnbError::NotJson
            })?;

        let places = places_search(state.storage.as_ref(), request).await?;
        info!("places_search matched {} places", places.len());
        Ok(Json(Value::Array(
            places.iter().map(Entity::to_dict).collect(),
        )))
    }
}
