//! Entity kind definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of entity held by the storage layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    /// Amenity offered by places
    Amenity,
    /// City, owned by a state
    City,
    /// Place, owned by a city and a user
    Place,
    /// State, owns cities
    State,
    /// User, owns places
    User,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "amenity" | "amenities" => Ok(Kind::Amenity),
            "city" | "cities" => Ok(Kind::City),
            "place" | "places" => Ok(Kind::Place),
            "state" | "states" => Ok(Kind::State),
            "user" | "users" => Ok(Kind::User),
            _ => Err(format!("Unknown entity kind: {}", s)),
        }
    }
}

impl Kind {
    /// Returns all kinds in stats order
    pub fn all() -> &'static [Kind] {
        &[
            Kind::Amenity,
            Kind::City,
            Kind::Place,
            Kind::State,
            Kind::User,
        ]
    }

    /// Class name written to `__class__` and used in file storage keys
    pub fn class_name(&self) -> &'static str {
        match self {
            Kind::Amenity => "Amenity",
            Kind::City => "City",
            Kind::Place => "Place",
            Kind::State => "State",
            Kind::User => "User",
        }
    }

    /// Plural collection name (table name, stats key)
    pub fn collection(&self) -> &'static str {
        match self {
            Kind::Amenity => "amenities",
            Kind::City => "cities",
            Kind::Place => "places",
            Kind::State => "states",
            Kind::User => "users",
        }
    }

    /// File storage key for an object of this kind
    pub fn storage_key(&self, id: &str) -> String {
        format!("{}.{}", self.class_name(), id)
    }
}
