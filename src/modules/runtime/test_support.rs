//! Shared fixtures for runtime tests

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use hbnb_core::{Amenity, City, Object, Place, State, User};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::server::build_router;
use crate::state::AppState;
use crate::storage::{MemoryStorage, Storage};

/// Two states, three cities, three amenities and four places.
///
/// California owns San Francisco (Loft, Studio) and Los Angeles (Cabin);
/// Nevada owns Reno (Casino Suite). Loft has wifi and pool, Studio has
/// wifi, pool and kitchen, Cabin has wifi, Casino Suite has none.
pub struct Fixture {
    pub storage: Arc<dyn Storage>,
    pub california: State,
    pub nevada: State,
    pub san_francisco: City,
    pub los_angeles: City,
    pub reno: City,
    pub wifi: Amenity,
    pub pool: Amenity,
    pub kitchen: Amenity,
    pub host: User,
    pub loft: Place,
    pub studio: Place,
    pub cabin: Place,
    pub casino_suite: Place,
}

impl Fixture {
    pub async fn seeded() -> Self {
        let california = State::new("California");
        let nevada = State::new("Nevada");
        let san_francisco = City::new(&california.id, "San Francisco");
        let los_angeles = City::new(&california.id, "Los Angeles");
        let reno = City::new(&nevada.id, "Reno");
        let wifi = Amenity::new("Wifi");
        let pool = Amenity::new("Pool");
        let kitchen = Amenity::new("Kitchen");
        let host = User::new("host@hbnb.io", "pwd").with_name("Betty", "Holberton");

        let place = |city: &City, name: &str, amenities: &[&Amenity]| {
            let mut place = Place::new(&city.id, &host.id, name);
            place.amenity_ids = amenities.iter().map(|a| a.id.clone()).collect();
            place
        };
        let loft = place(&san_francisco, "Loft", &[&wifi, &pool]);
        let studio = place(&san_francisco, "Studio", &[&wifi, &pool, &kitchen]);
        let cabin = place(&los_angeles, "Cabin", &[&wifi]);
        let casino_suite = place(&reno, "Casino Suite", &[]);

        let storage = MemoryStorage::with_objects([
            Object::from(california.clone()),
            Object::from(nevada.clone()),
            Object::from(san_francisco.clone()),
            Object::from(los_angeles.clone()),
            Object::from(reno.clone()),
            Object::from(wifi.clone()),
            Object::from(pool.clone()),
            Object::from(kitchen.clone()),
            Object::from(host.clone()),
            Object::from(loft.clone()),
            Object::from(studio.clone()),
            Object::from(cabin.clone()),
            Object::from(casino_suite.clone()),
        ]);

        Self {
            storage: Arc::new(storage),
            california,
            nevada,
            san_francisco,
            los_angeles,
            reno,
            wifi,
            pool,
            kitchen,
            host,
            loft,
            studio,
            cabin,
            casino_suite,
        }
    }

    pub fn place_count(&self) -> usize {
        4
    }

    /// Full application router over the fixture's storage
    pub fn router(&self) -> Router {
        build_router(AppState::new(self.storage.clone()))
    }
}

/// Send one request through the router and decode the JSON response
pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(router, request).await
}

/// Send a prebuilt request and decode the JSON response
pub async fn send_request(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
