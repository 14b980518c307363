//! Place/amenity link handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use hbnb_core::{Amenity, Entity, HbnbError, Place};
use serde_json::{json, Value};
use tracing::info;

use super::error::ApiResult;
use crate::state::AppState;
use crate::storage::Storage;

/// Handler for the amenities linked to a place
pub struct PlaceAmenitiesHandler;

async fn place_and_amenity(
    storage: &dyn Storage,
    place_id: &str,
    amenity_id: &str,
) -> Result<(Place, Amenity), HbnbError> {
    let place = storage
        .fetch::<Place>(place_id)
        .await?
        .ok_or(HbnbError::NotFound)?;
    let amenity = storage
        .fetch::<Amenity>(amenity_id)
        .await?
        .ok_or(HbnbError::NotFound)?;
    Ok((place, amenity))
}

impl PlaceAmenitiesHandler {
    /// Handle GET /places/{place_id}/amenities
    pub async fn list(
        State(state): State<AppState>,
        Path(place_id): Path<String>,
    ) -> ApiResult<Json<Value>> {
        let storage = state.storage.as_ref();
        let place = storage
            .fetch::<Place>(&place_id)
            .await?
            .ok_or(HbnbError::NotFound)?;

        let amenities = storage.amenities_of_place(&place).await?;
        Ok(Json(Value::Array(
            amenities.iter().map(Entity::to_dict).collect(),
        )))
    }

    /// Handle POST /places/{place_id}/amenities/{amenity_id}
    ///
    /// 201 on a new link, 200 when the amenity was already linked.
    pub async fn link(
        State(state): State<AppState>,
        Path((place_id, amenity_id)): Path<(String, String)>,
    ) -> ApiResult<(StatusCode, Json<Value>)> {
        let storage = state.storage.as_ref();
        let (mut place, amenity) = place_and_amenity(storage, &place_id, &amenity_id).await?;

        if place.has_amenity(&amenity.id) {
            return Ok((StatusCode::OK, Json(amenity.to_dict())));
        }

        place.amenity_ids.push(amenity.id.clone());
        place.touch();
        storage.store(place).await?;
        info!("Linked amenity {} to place {}", amenity_id, place_id);
        Ok((StatusCode::CREATED, Json(amenity.to_dict())))
    }

    /// Handle DELETE /places/{place_id}/amenities/{amenity_id}
    pub async fn unlink(
        State(state): State<AppState>,
        Path((place_id, amenity_id)): Path<(String, String)>,
    ) -> ApiResult<Json<Value>> {
        let storage = state.storage.as_ref();
        let (mut place, amenity) = place_and_amenity(storage, &place_id, &amenity_id).await?;

        if !place.has_amenity(&amenity.id) {
            return Err(HbnbError::NotFound.into());
        }

        place.amenity_ids = place
            .amenity_ids
            .into_iter()
            .filter(|id| *id != amenity.id)
            .collect();
        place.touch();
        storage.store(place).await?;
        info!("Unlinked amenity {} from place {}", amenity_id, place_id);
        Ok(Json(json!({})))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{send, Fixture};
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    fn names(body: &Value) -> Vec<&str> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|a| a["name"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_list_amenities() {
        let fx = Fixture::seeded().await;
        let uri = format!("/api/v1/places/{}/amenities", fx.studio.id);
        let (status, body) = send(fx.router(), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["Wifi", "Pool", "Kitchen"]);
        assert_eq!(body[2]["id"], json!(fx.kitchen.id));
    }

    #[tokio::test]
    async fn test_link_and_unlink() {
        let fx = Fixture::seeded().await;
        let link = format!("/api/v1/places/{}/amenities/{}", fx.cabin.id, fx.pool.id);

        let (status, body) = send(fx.router(), Method::POST, &link, None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], json!(fx.pool.id));

        let (status, _) = send(fx.router(), Method::POST, &link, None).await;
        assert_eq!(status, StatusCode::OK);

        let list = format!("/api/v1/places/{}/amenities", fx.cabin.id);
        let (_, body) = send(fx.router(), Method::GET, &list, None).await;
        assert_eq!(names(&body), vec!["Wifi", "Pool"]);

        let (status, body) = send(fx.router(), Method::DELETE, &link, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));

        let (status, body) = send(fx.router(), Method::DELETE, &link, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_unknown_place_or_amenity() {
        let fx = Fixture::seeded().await;
        let uris = [
            format!("/api/v1/places/nope/amenities/{}", fx.wifi.id),
            format!("/api/v1/places/{}/amenities/nope", fx.loft.id),
        ];
        for uri in uris {
            let (status, _) = send(fx.router(), Method::POST, &uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
        let (status, _) = send(fx.router(), Method::GET, "/places/nope/amenities", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
