//! Runtime type definitions for request/response handling

use serde::{Deserialize, Deserializer, Serialize};

/// Error body returned by every failing endpoint: `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Body of `POST /places_search`
///
/// Every criterion is optional; absent and `null` both mean empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacesSearchRequest {
    /// State ids whose cities' places are included
    #[serde(default, deserialize_with = "null_as_empty")]
    pub states: Vec<String>,

    /// City ids whose places are included
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cities: Vec<String>,

    /// Exact amenity set a place must have
    #[serde(default, deserialize_with = "null_as_empty")]
    pub amenities: Vec<String>,
}

impl PlacesSearchRequest {
    /// Returns true when no criterion is given
    pub fn is_empty(&self) -> bool {
        self.states.is_empty() && self.cities.is_empty() && self.amenities.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `GET /status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }
}
