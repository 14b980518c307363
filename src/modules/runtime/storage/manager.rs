//! Storage engine selection

use hbnb_core::{HbnbError, StorageConfig};
use hbnb_types::StorageType;
use std::sync::Arc;
use tracing::info;

use super::file::FileStorage;
use super::memory::MemoryStorage;
use super::mysql::DbStorage;
use super::traits::Storage;

/// Open the storage engine selected by configuration
pub async fn open_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>, HbnbError> {
    match config.storage_type {
        StorageType::File => {
            info!("Using file storage at {}", config.path());
            let storage = FileStorage::open(config.path()).await?;
            Ok(Arc::new(storage))
        }
        StorageType::Db => {
            let url = config.url.as_deref().ok_or_else(|| {
                HbnbError::Config("db storage requires a connection url".to_string())
            })?;
            info!("Using MySQL storage");
            let storage = DbStorage::with_config(url, &config.pool()).await?;
            Ok(Arc::new(storage))
        }
        StorageType::Memory => {
            info!("Using in-memory storage; nothing will be persisted");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_types::Kind;

    #[tokio::test]
    async fn test_open_memory() {
        let config = StorageConfig {
            storage_type: StorageType::Memory,
            ..StorageConfig::default()
        };
        let storage = open_storage(&config).await.unwrap();
        assert_eq!(storage.storage_type(), StorageType::Memory);
        assert_eq!(storage.count(Kind::Place).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            storage_type: StorageType::File,
            path: Some(dir.path().join("file.json").to_string_lossy().into_owned()),
            ..StorageConfig::default()
        };
        let storage = open_storage(&config).await.unwrap();
        assert_eq!(storage.storage_type(), StorageType::File);
    }

    #[tokio::test]
    async fn test_open_db_without_url() {
        let config = StorageConfig {
            storage_type: StorageType::Db,
            ..StorageConfig::default()
        };
        assert!(open_storage(&config).await.is_err());
    }
}
