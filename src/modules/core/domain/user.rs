//! User entity

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::entity::identity;

/// User; referenced by `Place::user_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(with = "hbnb_types::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "hbnb_types::timestamp")]
    pub updated_at: NaiveDateTime,
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl User {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        let (id, at) = identity();
        Self {
            id,
            created_at: at,
            updated_at: at,
            email: email.into(),
            password: password.into(),
            first_name: None,
            last_name: None,
        }
    }

    /// Set first and last name
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }
}
