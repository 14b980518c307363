//! Runtime for the HBnB API
//!
//! This crate provides the storage engines, place search and the HTTP
//! server with its request handlers.

pub mod handlers;
pub mod search;
pub mod server;
pub mod state;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use handlers::{
    counts_json, ApiError, IndexHandler, PlaceAmenitiesHandler, PlacesHandler, SearchHandler,
};
pub use search::places_search;
pub use server::{build_router, Runtime, API_PREFIX};
pub use state::AppState;
pub use storage::{open_storage, DbStorage, FileStorage, MemoryStorage, Storage};
