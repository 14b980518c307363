//! Tracing subscriber setup
//!
//! The subscriber is installed before configuration loads so the loader's
//! own events are kept; the configured level is applied afterwards through a
//! reload handle. `RUST_LOG` directives always take precedence.

use hbnb_core::HbnbError;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

/// Build a filter from a default level and optional `RUST_LOG` directives
pub fn filter(level: Level, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Handle on the installed log filter
pub struct Logging {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl Logging {
    /// Install the global subscriber at `level`
    pub fn init(level: Level) -> Self {
        let (layer, logging) = Self::layer(level);
        tracing_subscriber::registry()
            .with(layer)
            .with(fmt::layer())
            .init();
        logging
    }

    fn layer(level: Level) -> (reload::Layer<EnvFilter, Registry>, Self) {
        let directives = std::env::var("RUST_LOG").ok();
        let (layer, handle) = reload::Layer::new(filter(level, directives.as_deref()));
        (layer, Self { handle })
    }

    /// Replace the default level, keeping any `RUST_LOG` directives
    pub fn set_level(&self, level: Level) -> Result<(), HbnbError> {
        let directives = std::env::var("RUST_LOG").ok();
        self.handle
            .reload(filter(level, directives.as_deref()))
            .map_err(|e| HbnbError::Internal(format!("Failed to reload log filter: {}", e)))
    }

    /// Current filter, rendered as directives
    pub fn current(&self) -> Option<String> {
        self.handle.with_current(|f| f.to_string()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_default_level() {
        assert_eq!(filter(Level::WARN, None).to_string(), "warn");
        assert_eq!(filter(Level::DEBUG, Some("")).to_string(), "debug");
    }

    #[test]
    fn test_filter_keeps_directives() {
        let rendered = filter(Level::INFO, Some("hbnb_runtime=trace")).to_string();
        assert!(rendered.contains("hbnb_runtime=trace"));
    }

    #[test]
    fn test_set_level_after_startup() {
        let (_layer, logging) = Logging::layer(Level::INFO);
        let before = logging.current().unwrap();

        logging.set_level(Level::ERROR).unwrap();
        let after = logging.current().unwrap();

        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(before, "info");
            assert_eq!(after, "error");
        }
    }

    #[test]
    fn test_set_level_without_subscriber() {
        let (layer, logging) = Logging::layer(Level::INFO);
        drop(layer);
        assert!(logging.set_level(Level::WARN).is_err());
    }
}
