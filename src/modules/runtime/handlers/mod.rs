//! HTTP request handlers for the HBnB API
//!
//! This module contains handlers for the place resource, place search,
//! place/amenity links and the status endpoints.

mod amenities;
mod error;
mod index;
mod places;
mod search;

pub use amenities::PlaceAmenitiesHandler;
pub use error::{json_object, ApiError, ApiResult};
pub use index::{counts_json, IndexHandler};
pub use places::PlacesHandler;
pub use search::SearchHandler;
