//! JSON file storage engine

use async_trait::async_trait;
use hbnb_core::{Amenity, City, HbnbError, Object, Place};
use hbnb_types::{Kind, StorageType};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::memory::MemoryStorage;
use super::traits::Storage;

/// Memory store mirrored to a JSON file.
///
/// The file maps `"<Class>.<id>"` to the object's dict. It is read once on
/// open and rewritten after every save or delete. Opening and reading never
/// touch the file.
pub struct FileStorage {
    path: PathBuf,
    objects: MemoryStorage,
    write_lock: Mutex<()>,
    /// Set by a change, cleared once written
    dirty: AtomicBool,
}

impl FileStorage {
    /// Open the store, loading the file if it exists
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, HbnbError> {
        let path = path.into();
        let objects = load(&path).await?;
        info!("Loaded {} objects from {}", objects.len(), path.display());

        Ok(Self {
            path,
            objects: MemoryStorage::with_objects(objects),
            write_lock: Mutex::new(()),
            dirty: AtomicBool::new(false),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if a change has not reached the file yet
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Rewrite the backing file from the current objects
    async fn persist(&self) -> Result<(), HbnbError> {
        let _guard = self.write_lock.lock().await;
        self.dirty.store(false, Ordering::SeqCst);

        let mut document = Map::new();
        for object in self.objects.snapshot().await {
            document.insert(object.kind().storage_key(object.id()), object.to_dict());
        }
        let content = serde_json::to_vec(&Value::Object(document))?;

        // Write next to the target then rename so readers never see a torn file.
        let tmp = self.path.with_extension("json.tmp");
        let written = match tokio::fs::write(&tmp, content).await {
            Ok(()) => tokio::fs::rename(&tmp, &self.path)
                .await
                .map_err(|e| storage_io("replace", &self.path, e)),
            Err(e) => Err(storage_io("write", &tmp, e)),
        };
        if written.is_err() {
            self.dirty.store(true, Ordering::SeqCst);
        }
        written?;

        debug!("Persisted objects to {}", self.path.display());
        Ok(())
    }
}

async fn load(path: &Path) -> Result<Vec<Object>, HbnbError> {
    let content = match tokio::fs::read(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(storage_io("read", path, e)),
    };
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let document: Map<String, Value> = serde_json::from_slice(&content).map_err(|e| {
        HbnbError::Storage(format!("Malformed storage file {}: {}", path.display(), e))
    })?;

    document
        .into_iter()
        .map(|(key, value)| {
            serde_json::from_value::<Object>(value).map_err(|e| {
                HbnbError::Storage(format!("Malformed object '{}' in {}: {}", key, path.display(), e))
            })
        })
        .collect()
}

fn storage_io(action: &str, path: &Path, e: std::io::Error) -> HbnbError {
    HbnbError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Object>, HbnbError> {
        self.objects.get(kind, id).await
    }

    async fn all(&self, kind: Kind) -> Result<Vec<Object>, HbnbError> {
        self.objects.all(kind).await
    }

    async fn count(&self, kind: Kind) -> Result<usize, HbnbError> {
        self.objects.count(kind).await
    }

    async fn save(&self, object: Object) -> Result<(), HbnbError> {
        self.objects.save(object).await?;
        self.dirty.store(true, Ordering::SeqCst);
        self.persist().await
    }

    async fn delete(&self, kind: Kind, id: &str) -> Result<bool, HbnbError> {
        let removed = self.objects.delete(kind, id).await?;
        if removed {
            self.dirty.store(true, Ordering::SeqCst);
            self.persist().await?;
        }
        Ok(removed)
    }

    async fn cities_of_state(&self, state_id: &str) -> Result<Vec<City>, HbnbError> {
        self.objects.cities_of_state(state_id).await
    }

    async fn places_of_city(&self, city_id: &str) -> Result<Vec<Place>, HbnbError> {
        self.objects.places_of_city(city_id).await
    }

    async fn amenities_of_place(&self, place: &Place) -> Result<Vec<Amenity>, HbnbError> {
        self.objects.amenities_of_place(place).await
    }

    async fn close(&self) -> Result<(), HbnbError> {
        if self.has_unsaved_changes() {
            self.persist().await?;
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), HbnbError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => Err(HbnbError::Storage(
                format!("Storage directory {} does not exist", dir.display()),
            )),
            _ => Ok(()),
        }
    }

    fn storage_type(&self) -> StorageType {
        StorageType::File
    }
}
