//! Shared runtime application state (HTTP handlers)

use std::sync::Arc;

use crate::storage::Storage;

/// Application state shared across handlers.
///
/// The storage handle is the only state that outlives a request.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}
