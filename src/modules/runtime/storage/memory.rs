//! In-process storage engine

use async_trait::async_trait;
use hbnb_core::{Amenity, City, Entity, HbnbError, Object, Place};
use hbnb_types::{Kind, StorageType};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::traits::Storage;

/// Ordered in-memory store; objects iterate in insertion order per kind
pub struct MemoryStorage {
    objects: RwLock<HashMap<Kind, Vec<Object>>>,
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store holding the given objects, in order
    pub fn with_objects(objects: impl IntoIterator<Item = Object>) -> Self {
        let mut map: HashMap<Kind, Vec<Object>> = HashMap::new();
        for object in objects {
            upsert(map.entry(object.kind()).or_default(), object);
        }
        Self {
            objects: RwLock::new(map),
        }
    }

    /// Copy of every object, grouped by kind in [`Kind::all`] order
    pub async fn snapshot(&self) -> Vec<Object> {
        let objects = self.objects.read().await;
        Kind::all()
            .iter()
            .filter_map(|kind| objects.get(kind))
            .flat_map(|bucket| bucket.iter().cloned())
            .collect()
    }

    /// Every entity of a type matching a predicate
    async fn select<T, F>(&self, predicate: F) -> Vec<T>
    where
        T: Entity,
        F: Fn(&T) -> bool,
    {
        let objects = self.objects.read().await;
        objects
            .get(&T::KIND)
            .map(|bucket| {
                bucket
                    .iter()
                    .cloned()
                    .filter_map(T::from_object)
                    .filter(|entity| predicate(entity))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace in place to keep the original position, else append
fn upsert(bucket: &mut Vec<Object>, object: Object) {
    match bucket.iter_mut().find(|o| o.id() == object.id()) {
        Some(slot) => *slot = object,
        None => bucket.push(object),
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Object>, HbnbError> {
        let objects = self.objects.read().await;
        Ok(objects
            .get(&kind)
            .and_then(|bucket| bucket.iter().find(|o| o.id() == id))
            .cloned())
    }

    async fn all(&self, kind: Kind) -> Result<Vec<Object>, HbnbError> {
        let objects = self.objects.read().await;
        Ok(objects.get(&kind).cloned().unwrap_or_default())
    }

    async fn count(&self, kind: Kind) -> Result<usize, HbnbError> {
        let objects = self.objects.read().await;
        Ok(objects.get(&kind).map_or(0, Vec::len))
    }

    async fn save(&self, object: Object) -> Result<(), HbnbError> {
        let mut objects = self.objects.write().await;
        upsert(objects.entry(object.kind()).or_default(), object);
        Ok(())
    }

    async fn delete(&self, kind: Kind, id: &str) -> Result<bool, HbnbError> {
        let mut objects = self.objects.write().await;
        let Some(bucket) = objects.get_mut(&kind) else {
            return Ok(false);
        };
        match bucket.iter().position(|o| o.id() == id) {
            Some(index) => {
                bucket.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn cities_of_state(&self, state_id: &str) -> Result<Vec<City>, HbnbError> {
        Ok(self.select(|city: &City| city.state_id == state_id).await)
    }

    async fn places_of_city(&self, city_id: &str) -> Result<Vec<Place>, HbnbError> {
        Ok(self.select(|place: &Place| place.city_id == city_id).await)
    }

    async fn amenities_of_place(&self, place: &Place) -> Result<Vec<Amenity>, HbnbError> {
        let objects = self.objects.read().await;
        let Some(bucket) = objects.get(&Kind::Amenity) else {
            return Ok(Vec::new());
        };
        Ok(place
            .amenity_ids
            .iter()
            .filter_map(|id| bucket.iter().find(|o| o.id() == id))
            .cloned()
            .filter_map(Amenity::from_object)
            .collect())
    }

    async fn close(&self) -> Result<(), HbnbError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<(), HbnbError> {
        Ok(())
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Memory
    }
}
