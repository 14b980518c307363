//! Place entity and its typed create/update inputs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::{identity, Entity};
use crate::HbnbError;

/// Place offered for rent in a city by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    #[serde(with = "hbnb_types::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "hbnb_types::timestamp")]
    pub updated_at: NaiveDateTime,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub number_rooms: i64,
    #[serde(default)]
    pub number_bathrooms: i64,
    #[serde(default)]
    pub max_guest: i64,
    #[serde(default)]
    pub price_by_night: i64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Linked amenity ids, in link order
    #[serde(default)]
    pub amenity_ids: Vec<String>,
}

impl Place {
    /// Build a new place with a fresh id and timestamps
    pub fn new(
        city_id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let (id, at) = identity();
        Self {
            id,
            created_at: at,
            updated_at: at,
            city_id: city_id.into(),
            user_id: user_id.into(),
            name: name.into(),
            description: None,
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: None,
            longitude: None,
            amenity_ids: Vec::new(),
        }
    }

    /// Build a place from a validated create request
    pub fn create(input: NewPlace) -> Self {
        let mut place = Self::new(input.city_id, input.user_id, input.name);
        place.description = input.description;
        place.number_rooms = input.number_rooms;
        place.number_bathrooms = input.number_bathrooms;
        place.max_guest = input.max_guest;
        place.price_by_night = input.price_by_night;
        place.latitude = input.latitude;
        place.longitude = input.longitude;
        place
    }

    /// Overwrite the fields present in `update` and refresh `updated_at`
    pub fn apply(&mut self, update: PlaceUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(n) = update.number_rooms {
            self.number_rooms = n;
        }
        if let Some(n) = update.number_bathrooms {
            self.number_bathrooms = n;
        }
        if let Some(n) = update.max_guest {
            self.max_guest = n;
        }
        if let Some(n) = update.price_by_night {
            self.price_by_night = n;
        }
        if let Some(latitude) = update.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = update.longitude {
            self.longitude = longitude;
        }
        self.touch();
    }

    /// Returns true if the amenity is linked to this place
    pub fn has_amenity(&self, amenity_id: &str) -> bool {
        self.amenity_ids.iter().any(|id| id == amenity_id)
    }
}

/// Validated body of `POST /cities/{city_id}/places`
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlace {
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub number_rooms: i64,
    pub number_bathrooms: i64,
    pub max_guest: i64,
    pub price_by_night: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl NewPlace {
    /// Extract the owning user id; checked before anything else in the body
    pub fn user_id(body: &Map<String, Value>) -> Result<String, HbnbError> {
        string_field(body, "user_id")?.ok_or_else(|| HbnbError::missing("user_id"))
    }

    /// Parse the remaining fields once city and user are known to exist
    pub fn from_body(
        city_id: impl Into<String>,
        user_id: impl Into<String>,
        body: &Map<String, Value>,
    ) -> Result<Self, HbnbError> {
        let name = string_field(body, "name")?.ok_or_else(|| HbnbError::missing("name"))?;

        Ok(Self {
            city_id: city_id.into(),
            user_id: user_id.into(),
            name,
            description: string_field(body, "description")?,
            number_rooms: int_field(body, "number_rooms")?.unwrap_or(0),
            number_bathrooms: int_field(body, "number_bathrooms")?.unwrap_or(0),
            max_guest: int_field(body, "max_guest")?.unwrap_or(0),
            price_by_night: int_field(body, "price_by_night")?.unwrap_or(0),
            latitude: float_field(body, "latitude")?,
            longitude: float_field(body, "longitude")?,
        })
    }
}

/// Allow-listed patch for `PUT /places/{place_id}`
///
/// `id`, `created_at`, `updated_at`, `user_id`, `city_id` and unknown keys
/// are dropped. For nullable fields the outer `Option` is presence and the
/// inner one the new value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub number_rooms: Option<i64>,
    pub number_bathrooms: Option<i64>,
    pub max_guest: Option<i64>,
    pub price_by_night: Option<i64>,
    pub latitude: Option<Option<f64>>,
    pub longitude: Option<Option<f64>>,
}

impl PlaceUpdate {
    /// Parse the allow-listed keys out of an update body
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, HbnbError> {
        Ok(Self {
            name: required_on_update(body, "name", string_field)?,
            description: nullable_on_update(body, "description", string_field)?,
            number_rooms: required_on_update(body, "number_rooms", int_field)?,
            number_bathrooms: required_on_update(body, "number_bathrooms", int_field)?,
            max_guest: required_on_update(body, "max_guest", int_field)?,
            price_by_night: required_on_update(body, "price_by_night", int_field)?,
            latitude: nullable_on_update(body, "latitude", float_field)?,
            longitude: nullable_on_update(body, "longitude", float_field)?,
        })
    }

    /// Returns true when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

type FieldParser<T> = fn(&Map<String, Value>, &str) -> Result<Option<T>, HbnbError>;

/// Present keys must carry a non-null value
fn required_on_update<T>(
    body: &Map<String, Value>,
    key: &str,
    parse: FieldParser<T>,
) -> Result<Option<T>, HbnbError> {
    match body.get(key) {
        None => Ok(None),
        Some(Value::Null) => Err(HbnbError::invalid(key)),
        Some(_) => parse(body, key),
    }
}

/// Present keys may be null to clear the field
fn nullable_on_update<T>(
    body: &Map<String, Value>,
    key: &str,
    parse: FieldParser<T>,
) -> Result<Option<Option<T>>, HbnbError> {
    if body.contains_key(key) {
        parse(body, key).map(Some)
    } else {
        Ok(None)
    }
}

// Absent and null both read as `None`.

fn string_field(body: &Map<String, Value>, key: &str) -> Result<Option<String>, HbnbError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(HbnbError::invalid(key)),
    }
}

fn int_field(body: &Map<String, Value>, key: &str) -> Result<Option<i64>, HbnbError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| HbnbError::invalid(key)),
        Some(_) => Err(HbnbError::invalid(key)),
    }
}

/// Numbers and numeric strings are both accepted
fn float_field(body: &Map<String, Value>, key: &str) -> Result<Option<f64>, HbnbError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| HbnbError::invalid(key)),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| HbnbError::invalid(key)),
        Some(_) => Err(HbnbError::invalid(key)),
    }
}
