//! Amenity entity

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::entity::identity;

/// Amenity a place can offer (many-to-many with places)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: String,
    #[serde(with = "hbnb_types::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "hbnb_types::timestamp")]
    pub updated_at: NaiveDateTime,
    pub name: String,
}

impl Amenity {
    pub fn new(name: impl Into<String>) -> Self {
        let (id, at) = identity();
        Self {
            id,
            created_at: at,
            updated_at: at,
            name: name.into(),
        }
    }
}
