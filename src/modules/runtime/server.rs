//! HTTP server for the HBnB API

use axum::{
    routing::{get, post, MethodRouter},
    Router,
};
use hbnb_core::{HbnbError, Settings};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::handlers::{IndexHandler, PlaceAmenitiesHandler, PlacesHandler, SearchHandler};
use crate::state::AppState;
use crate::storage::{open_storage, Storage};

/// Prefix under which every route is also mounted
pub const API_PREFIX: &str = "/api/v1";

/// Runtime server for the HBnB API
pub struct Runtime {
    settings: Settings,
    storage: Arc<dyn Storage>,
}

/// Register `path` both with and without a trailing slash
fn route_both(
    router: Router<AppState>,
    path: &str,
    handler: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, handler.clone())
        .route(&format!("{}/", path), handler)
}

/// API routes, without state or middleware
fn api_routes() -> Router<AppState> {
    let mut router = Router::new();
    router = route_both(router, "/status", get(IndexHandler::status));
    router = route_both(router, "/stats", get(IndexHandler::stats));
    router = route_both(
        router,
        "/cities/:city_id/places",
        get(PlacesHandler::list_by_city).post(PlacesHandler::create),
    );
    router = route_both(
        router,
        "/places/:place_id",
        get(PlacesHandler::get)
            .delete(PlacesHandler::delete)
            .put(PlacesHandler::update),
    );
    router = route_both(router, "/places_search", post(SearchHandler::search));
    router = route_both(
        router,
        "/places/:place_id/amenities",
        get(PlaceAmenitiesHandler::list),
    );
    route_both(
        router,
        "/places/:place_id/amenities/:amenity_id",
        post(PlaceAmenitiesHandler::link).delete(PlaceAmenitiesHandler::unlink),
    )
}

/// Build the Axum router over shared state
pub fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request timeout
    let timeout = TimeoutLayer::new(Duration::from_secs(30));

    Router::new()
        .merge(api_routes())
        .nest(API_PREFIX, api_routes())
        .fallback(IndexHandler::not_found)
        .with_state(state)
        // Middleware
        .layer(cors)
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
}

impl Runtime {
    /// Create a new runtime, opening the configured storage engine
    pub async fn new(settings: Settings) -> Result<Self, HbnbError> {
        let storage = open_storage(&settings.storage).await?;
        storage.health_check().await?;
        Ok(Self::with_storage(settings, storage))
    }

    /// Create a runtime over an already opened storage engine
    pub fn with_storage(settings: Settings, storage: Arc<dyn Storage>) -> Self {
        Self { settings, storage }
    }

    /// Override the bind host and port, e.g. from command-line flags
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.settings.server.host = Some(host);
        }
        if let Some(port) = port {
            self.settings.server.port = Some(port);
        }
        self
    }

    /// Address the server binds to
    pub fn address(&self) -> Result<SocketAddr, HbnbError> {
        format!("{}:{}", self.settings.host(), self.settings.port())
            .parse()
            .map_err(|e| HbnbError::Server(format!("Invalid address: {}", e)))
    }

    /// Start the server and serve until a shutdown signal arrives
    pub async fn run(&self) -> Result<(), HbnbError> {
        let addr = self.address()?;
        let app = build_router(AppState::new(self.storage.clone()));

        info!("Starting {} on http://{}", self.settings.name, addr);
        info!("Storage: {}", self.storage.storage_type());
        info!("API root: http://{}{}", addr, API_PREFIX);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| HbnbError::Server(format!("Failed to bind: {}", e)))?;

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(Self::shutdown_signal())
            .await
            .map_err(|e| HbnbError::Server(format!("Server error: {}", e)));

        info!("Server stopped");
        self.shutdown().await?;
        served
    }

    /// Wait for shutdown signal
    async fn shutdown_signal() {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to listen for CTRL+C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    error!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                debug!("Received CTRL+C, shutting down...");
            }
            _ = terminate => {
                debug!("Received SIGTERM, shutting down...");
            }
        }
    }

    /// Release the storage engine
    pub async fn shutdown(&self) -> Result<(), HbnbError> {
        info!("Closing storage...");
        if let Err(e) = self.storage.close().await {
            warn!("Error closing storage: {}", e);
        }
        info!("Shutdown complete");
        Ok(())
    }

    /// Get the settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get the storage engine
    pub fn storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::test_support::{send, Fixture};
    use axum::http::{Method, StatusCode};
    use hbnb_core::StorageConfig;
    use hbnb_types::StorageType;

    fn memory_settings() -> Settings {
        let mut settings = Settings::new("test-api");
        settings.storage = StorageConfig {
            storage_type: StorageType::Memory,
            ..StorageConfig::default()
        };
        settings
    }

    #[tokio::test]
    async fn test_runtime_creation() {
        let runtime = Runtime::new(memory_settings()).await.unwrap();
        assert_eq!(runtime.storage().storage_type(), StorageType::Memory);
        assert_eq!(runtime.address().unwrap().port(), 5000);
    }

    #[tokio::test]
    async fn test_runtime_with_overrides() {
        let runtime = Runtime::with_storage(memory_settings(), Arc::new(MemoryStorage::new()))
            .with_overrides(Some("127.0.0.1".to_string()), Some(3000));
        assert_eq!(runtime.address().unwrap().to_string(), "127.0.0.1:3000");
        assert_eq!(runtime.settings().port(), 3000);
    }

    #[tokio::test]
    async fn test_invalid_host() {
        let runtime = Runtime::with_storage(memory_settings(), Arc::new(MemoryStorage::new()))
            .with_overrides(Some("not a host".to_string()), None);
        assert!(runtime.address().is_err());
    }

    #[tokio::test]
    async fn test_routes_mounted_at_root_and_prefix() {
        let fx = Fixture::seeded().await;
        for uri in ["/status", "/status/", "/api/v1/status", "/api/v1/status/"] {
            let (status, _) = send(fx.router(), Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_shutdown_closes_storage() {
        let runtime = Runtime::new(memory_settings()).await.unwrap();
        assert!(runtime.shutdown().await.is_ok());
    }
}
