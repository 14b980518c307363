//! Storage trait definition

use async_trait::async_trait;
use hbnb_core::{Amenity, City, Entity, HbnbError, Object, Place};
use hbnb_types::{Kind, StorageType};

/// Trait for storage engines
///
/// All engines implement this trait so handlers and the place search can
/// stay engine-agnostic. Each call is atomic on its own; nothing spans calls.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Look up one object by kind and id
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Object>, HbnbError>;

    /// Every object of a kind, in storage iteration order
    async fn all(&self, kind: Kind) -> Result<Vec<Object>, HbnbError>;

    /// Number of objects of a kind
    async fn count(&self, kind: Kind) -> Result<usize, HbnbError> {
        Ok(self.all(kind).await?.len())
    }

    /// Insert the object, or replace the stored object with the same kind and id
    async fn save(&self, object: Object) -> Result<(), HbnbError>;

    /// Remove an object; returns false when nothing was stored under the id
    async fn delete(&self, kind: Kind, id: &str) -> Result<bool, HbnbError>;

    /// Cities owned by a state
    async fn cities_of_state(&self, state_id: &str) -> Result<Vec<City>, HbnbError>;

    /// Places owned by a city
    async fn places_of_city(&self, city_id: &str) -> Result<Vec<Place>, HbnbError>;

    /// Existing amenities linked to a place, in link order
    async fn amenities_of_place(&self, place: &Place) -> Result<Vec<Amenity>, HbnbError>;

    /// Flush and release resources
    async fn close(&self) -> Result<(), HbnbError>;

    /// Check if the engine is usable
    async fn health_check(&self) -> Result<(), HbnbError>;

    /// Get the engine type
    fn storage_type(&self) -> StorageType;
}

impl dyn Storage + '_ {
    /// Look up one entity by id
    pub async fn fetch<T: Entity>(&self, id: &str) -> Result<Option<T>, HbnbError> {
        Ok(self.get(T::KIND, id).await?.and_then(T::from_object))
    }

    /// Every entity of a type, in storage iteration order
    pub async fn fetch_all<T: Entity>(&self) -> Result<Vec<T>, HbnbError> {
        Ok(self
            .all(T::KIND)
            .await?
            .into_iter()
            .filter_map(T::from_object)
            .collect())
    }

    /// Insert or replace an entity
    pub async fn store<T: Entity>(&self, entity: T) -> Result<(), HbnbError> {
        self.save(entity.into_object()).await
    }

    /// Object count per kind, in [`Kind::all`] order
    pub async fn counts(&self) -> Result<Vec<(Kind, usize)>, HbnbError> {
        let mut counts = Vec::with_capacity(Kind::all().len());
        for kind in Kind::all() {
            counts.push((*kind, self.count(*kind).await?));
        }
        Ok(counts)
    }
}
