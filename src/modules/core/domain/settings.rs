//! Service configuration models

use hbnb_types::StorageType;
use serde::{Deserialize, Serialize};

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_PORT: u16 = 5000;

/// Default JSON file used by file storage
pub const DEFAULT_FILE_PATH: &str = "file.json";

/// Root configuration for the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Service name, used in logs
    pub name: String,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage engine configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Settings {
    /// Create settings with the given name and every default
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
        }
    }

    /// Bind host, defaulting to 0.0.0.0
    pub fn host(&self) -> &str {
        self.server.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Bind port, defaulting to 5000
    pub fn port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_PORT)
    }

    /// Log level, defaulting to 1 (INFO)
    pub fn log_level(&self) -> u8 {
        self.server.log_level.unwrap_or(1)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new("hbnb")
    }
}

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind (default: 0.0.0.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Port to listen on (default: 5000)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Log level: 0=DEBUG, 1=INFO, 2=WARN, 3=ERROR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<u8>,
}

/// Storage engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Engine to use (default: file)
    #[serde(rename = "type", default)]
    pub storage_type: StorageType,

    /// JSON file for file storage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Connection URL for db storage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Connection pool configuration for db storage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolConfig>,
}

impl StorageConfig {
    /// File storage path, defaulting to `file.json`
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(DEFAULT_FILE_PATH)
    }

    /// Pool configuration, defaulting to [`PoolConfig::default`]
    pub fn pool(&self) -> PoolConfig {
        self.pool.clone().unwrap_or_default()
    }
}

/// Connection pool configuration for db storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool (default: 10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,

    /// Minimum number of connections to maintain (default: 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_connections: Option<u32>,

    /// Connection acquire timeout in seconds (default: 30)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquire_timeout_secs: Option<u64>,

    /// Idle connection timeout in seconds (default: 600)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_timeout_secs: Option<u64>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: Some(10),
            min_connections: Some(1),
            acquire_timeout_secs: Some(30),
            idle_timeout_secs: Some(600),
        }
    }
}

impl PoolConfig {
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(10)
    }

    pub fn min_connections(&self) -> u32 {
        self.min_connections.unwrap_or(1)
    }

    pub fn acquire_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.acquire_timeout_secs.unwrap_or(30))
    }

    pub fn idle_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.idle_timeout_secs.unwrap_or(600))
    }
}
