//! Place resource handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use hbnb_core::{City, Entity, HbnbError, NewPlace, Place, PlaceUpdate, User};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::error::{json_object, ApiResult};
use crate::state::AppState;

/// Handler for the place endpoints
pub struct PlacesHandler;

impl PlacesHandler {
    /// Handle GET /cities/{city_id}/places
    pub async fn list_by_city(
        State(state): State<AppState>,
        Path(city_id): Path<String>,
    ) -> ApiResult<Json<Value>> {
        let storage = state.storage.as_ref();
        storage
            .fetch::<City>(&city_id)
            .await?
            .ok_or(HbnbError::NotFound)?;

        let places = storage.places_of_city(&city_id).await?;
        debug!("City {} has {} places", city_id, places.len());
        Ok(Json(Value::Array(
            places.iter().map(Entity::to_dict).collect(),
        )))
    }

    /// Handle GET /places/{place_id}
    pub async fn get(
        State(state): State<AppState>,
        Path(place_id): Path<String>,
    ) -> ApiResult<Json<Value>> {
        let place = state
            .storage
            .as_ref()
            .fetch::<Place>(&place_id)
            .await?
            .ok_or(HbnbError::NotFound)?;
        Ok(Json(place.to_dict()))
    }

    /// Handle DELETE /places/{place_id}
    pub async fn delete(
        State(state): State<AppState>,
        Path(place_id): Path<String>,
    ) -> ApiResult<Json<Value>> {
        if !state.storage.delete(Place::KIND, &place_id).await? {
            return Err(HbnbError::NotFound.into());
        }
        info!("Deleted place {}", place_id);
        Ok(Json(json!({})))
    }

    /// Handle POST /cities/{city_id}/places
    ///
    /// Checks run in a fixed order: city, body, `user_id`, user, `name`.
    pub async fn create(
        State(state): State<AppState>,
        Path(city_id): Path<String>,
        body: Result<Json<Value>, JsonRejection>,
    ) -> ApiResult<(StatusCode, Json<Value>)> {
        let storage = state.storage.as_ref();
        storage
            .fetch::<City>(&city_id)
            .await?
            .ok_or(HbnbError::NotFound)?;

        let body = json_object(body)?;
        let user_id = NewPlace::user_id(&body)?;
        storage
            .fetch::<User>(&user_id)
            .await?
            .ok_or(HbnbError::NotFound)?;

        let place = Place::create(NewPlace::from_body(city_id, user_id, &body)?);
        storage.store(place.clone()).await?;

        info!("Created place {} in city {}", place.id, place.city_id);
        Ok((StatusCode::CREATED, Json(place.to_dict())))
    }

    /// Handle PUT /places/{place_id}
    pub async fn update(
        State(state): State<AppState>,
        Path(place_id): Path<String>,
        body: Result<Json<Value>, JsonRejection>,
    ) -> ApiResult<Json<Value>> {
        let storage = state.storage.as_ref();
        let mut place = storage
            .fetch::<Place>(&place_id)
            .await?
            .ok_or(HbnbError::NotFound)?;

        let update = PlaceUpdate::from_body(&json_object(body)?)?;
        if update.is_empty() {
            debug!("Update of place {} changes no mutable field", place_id);
        }
        place.apply(update);
        storage.store(place.clone()).await?;

        info!("Updated place {}", place_id);
        Ok(Json(place.to_dict()))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{send, send_request, Fixture};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};

    fn names(body: &Value) -> Vec<&str> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_list_by_city() {
        let fx = Fixture::seeded().await;
        let uri = format!("/api/v1/cities/{}/places", fx.san_francisco.id);
        let (status, body) = send(fx.router(), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["Loft", "Studio"]);
        assert_eq!(body[0]["__class__"], "Place");

        let uri = format!("/api/v1/cities/{}/places/", fx.los_angeles.id);
        let (status, body) = send(fx.router(), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["Cabin"]);
    }

    #[tokio::test]
    async fn test_list_by_unknown_city() {
        let fx = Fixture::seeded().await;
        let (status, body) = send(fx.router(), Method::GET, "/cities/nope/places", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_get_place() {
        let fx = Fixture::seeded().await;
        let uri = format!("/api/v1/places/{}/", fx.loft.id);
        let (status, body) = send(fx.router(), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], json!(fx.loft.id));
        assert_eq!(body["city_id"], json!(fx.san_francisco.id));
    }

    #[tokio::test]
    async fn test_missing_place_is_404_everywhere() {
        let fx = Fixture::seeded().await;
        for method in [Method::GET, Method::DELETE] {
            let (status, body) = send(fx.router(), method, "/api/v1/places/nope", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, json!({"error": "Not found"}));
        }
        let (status, body) = send(
            fx.router(),
            Method::PUT,
            "/api/v1/places/nope",
            Some(json!({"name": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let fx = Fixture::seeded().await;
        let uri = format!("/api/v1/places/{}", fx.cabin.id);

        let (status, body) = send(fx.router(), Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));

        let (status, _) = send(fx.router(), Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(fx.router(), Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_place() {
        let fx = Fixture::seeded().await;
        let uri = format!("/api/v1/cities/{}/places", fx.reno.id);
        let (status, body) = send(
            fx.router(),
            Method::POST,
            &uri,
            Some(json!({
                "user_id": fx.host.id,
                "name": "Desert Nook",
                "latitude": "39.52",
                "city_id": "ignored",
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["city_id"], json!(fx.reno.id));
        assert_eq!(body["user_id"], json!(fx.host.id));
        assert_eq!(body["number_rooms"], json!(0));
        assert_eq!(body["number_bathrooms"], json!(0));
        assert_eq!(body["max_guest"], json!(0));
        assert_eq!(body["price_by_night"], json!(0));
        assert_eq!(body["latitude"], json!(39.52));

        let get = format!("/api/v1/places/{}", body["id"].as_str().unwrap());
        let (status, stored) = send(fx.router(), Method::GET, &get, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored["name"], "Desert Nook");
    }

    #[tokio::test]
    async fn test_create_missing_user_id() {
        let fx = Fixture::seeded().await;
        let uri = format!("/api/v1/cities/{}/places", fx.reno.id);
        let (status, body) = send(
            fx.router(),
            Method::POST,
            &uri,
            Some(json!({"name": "Nook", "number_rooms": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing user_id"}));
    }

    #[tokio::test]
    async fn test_create_missing_name() {
        let fx = Fixture::seeded().await;
        let uri = format!("/api/v1/cities/{}/places", fx.reno.id);
        let (status, body) = send(
            fx.router(),
            Method::POST,
            &uri,
            Some(json!({"user_id": fx.host.id})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing name"}));
    }

    #[tokio::test]
    async fn test_create_unknown_user() {
        let fx = Fixture::seeded().await;
        let uri = format!("/api/v1/cities/{}/places", fx.reno.id);
        let (status, body) = send(
            fx.router(),
            Method::POST,
            &uri,
            Some(json!({"user_id": "nobody", "name": "Nook"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_create_bad_latitude() {
        let fx = Fixture::seeded().await;
        let uri = format!("/api/v1/cities/{}/places", fx.reno.id);
        let (status, body) = send(
            fx.router(),
            Method::POST,
            &uri,
            Some(json!({"user_id": fx.host.id, "name": "Nook", "latitude": "north"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid latitude"}));
    }

    #[tokio::test]
    async fn test_unknown_city_checked_before_body() {
        let fx = Fixture::seeded().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/cities/nope/places")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("not json"))
            .unwrap();
        let (status, body) = send_request(fx.router(), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_create_not_json() {
        let fx = Fixture::seeded().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/api/v1/cities/{}/places", fx.reno.id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();
        let (status, body) = send_request(fx.router(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Not a JSON"}));

        let uri = format!("/api/v1/cities/{}/places", fx.reno.id);
        let (status, body) = send(fx.router(), Method::POST, &uri, Some(json!(["a"]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Not a JSON"}));
    }

    #[tokio::test]
    async fn test_update_ignores_immutable_fields() {
        let fx = Fixture::seeded().await;
        let uri = format!("/api/v1/places/{}", fx.loft.id);
        let (status, body) = send(
            fx.router(),
            Method::PUT,
            &uri,
            Some(json!({
                "id": "hijacked",
                "created_at": "2000-01-01T00:00:00.000000",
                "updated_at": "2000-01-01T00:00:00.000000",
                "user_id": "someone-else",
                "city_id": fx.reno.id,
                "unknown": true,
                "price_by_night": 120,
                "description": "Sunny loft",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], json!(fx.loft.id));
        assert_eq!(body["price_by_night"], json!(120));

        let (_, stored) = send(fx.router(), Method::GET, &uri, None).await;
        let original = serde_json::to_value(&fx.loft).unwrap();
        for key in ["id", "created_at", "user_id", "city_id", "name"] {
            assert_eq!(stored[key], original[key], "{} changed", key);
        }
        assert_eq!(stored["price_by_night"], json!(120));
        assert_eq!(stored["description"], "Sunny loft");
        assert!(stored.get("unknown").is_none());
        assert_ne!(stored["updated_at"], json!("2000-01-01T00:00:00.000000"));
    }

    #[tokio::test]
    async fn test_update_invalid_value() {
        let fx = Fixture::seeded().await;
        let uri = format!("/api/v1/places/{}", fx.loft.id);
        let (status, body) = send(
            fx.router(),
            Method::PUT,
            &uri,
            Some(json!({"max_guest": "lots"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid max_guest"}));
    }

    #[tokio::test]
    async fn test_update_not_json() {
        let fx = Fixture::seeded().await;
        let request = Request::builder()
            .method(Method::PUT)
            .uri(format!("/api/v1/places/{}", fx.loft.id))
            .body(Body::from("name=x"))
            .unwrap();
        let (status, body) = send_request(fx.router(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Not a JSON"}));
    }
}
