//! Domain models for the HBnB API

mod amenity;
mod entity;
mod geo;
mod place;
mod settings;
mod user;

pub use amenity::Amenity;
pub use entity::{Entity, Object};
pub use geo::{City, State};
pub use place::{NewPlace, Place, PlaceUpdate};
pub use settings::{PoolConfig, ServerConfig, Settings, StorageConfig};
pub use user::User;
