//! States and the cities they own

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::entity::identity;

/// State; owns every city whose `state_id` matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: String,
    #[serde(with = "hbnb_types::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "hbnb_types::timestamp")]
    pub updated_at: NaiveDateTime,
    pub name: String,
}

/// City; owns every place whose `city_id` matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    #[serde(with = "hbnb_types::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "hbnb_types::timestamp")]
    pub updated_at: NaiveDateTime,
    pub state_id: String,
    pub name: String,
}

impl State {
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

impl City {
    pub fn new(state_id: impl Into<String>, name: impl Into<String>) -> Self {
        let (id, at) = identity();
        Self {
            id,
            created_at: at,
            updated_at: at,
            state_id: state_id.into(),
            name: name.into(),
        }
    }
}
