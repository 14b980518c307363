//! MySQL storage engine

use async_trait::async_trait;
use hbnb_core::{Amenity, City, HbnbError, Object, Place, PoolConfig, State, User};
use hbnb_types::{Kind, StorageType};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{MySql, Row, Transaction};
use tracing::debug;

use super::traits::Storage;

/// Tables, in creation order (referenced tables first)
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS states (
        id VARCHAR(60) NOT NULL PRIMARY KEY,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        name VARCHAR(128) NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS cities (
        id VARCHAR(60) NOT NULL PRIMARY KEY,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        state_id VARCHAR(60) NOT NULL,
        name VARCHAR(128) NOT NULL,
        FOREIGN KEY (state_id) REFERENCES states (id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id VARCHAR(60) NOT NULL PRIMARY KEY,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        email VARCHAR(128) NOT NULL,
        password VARCHAR(128) NOT NULL,
        first_name VARCHAR(128) NULL,
        last_name VARCHAR(128) NULL
    )",
    "CREATE TABLE IF NOT EXISTS amenities (
        id VARCHAR(60) NOT NULL PRIMARY KEY,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        name VARCHAR(128) NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS places (
        id VARCHAR(60) NOT NULL PRIMARY KEY,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        city_id VARCHAR(60) NOT NULL,
        user_id VARCHAR(60) NOT NULL,
        name VARCHAR(128) NOT NULL,
        description VARCHAR(1024) NULL,
        number_rooms BIGINT NOT NULL DEFAULT 0,
        number_bathrooms BIGINT NOT NULL DEFAULT 0,
        max_guest BIGINT NOT NULL DEFAULT 0,
        price_by_night BIGINT NOT NULL DEFAULT 0,
        latitude DOUBLE NULL,
        longitude DOUBLE NULL,
        FOREIGN KEY (city_id) REFERENCES cities (id) ON DELETE CASCADE,
        FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS place_amenity (
        seq BIGINT NOT NULL AUTO_INCREMENT UNIQUE,
        place_id VARCHAR(60) NOT NULL,
        amenity_id VARCHAR(60) NOT NULL,
        PRIMARY KEY (place_id, amenity_id),
        FOREIGN KEY (place_id) REFERENCES places (id) ON DELETE CASCADE,
        FOREIGN KEY (amenity_id) REFERENCES amenities (id) ON DELETE CASCADE
    )",
];

/// MySQL storage engine
pub struct DbStorage {
    pool: MySqlPool,
}

impl DbStorage {
    /// Connect with default pool settings
    pub async fn new(url: &str) -> Result<Self, HbnbError> {
        Self::with_config(url, &PoolConfig::default()).await
    }

    /// Connect with custom pool settings and create missing tables
    pub async fn with_config(url: &str, config: &PoolConfig) -> Result<Self, HbnbError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections())
            .min_connections(config.min_connections())
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_timeout())
            .connect(url)
            .await
            .map_err(|e| HbnbError::Storage(format!("MySQL connection failed: {}", e)))?;

        let storage = Self { pool };
        storage.create_schema().await?;
        Ok(storage)
    }

    async fn create_schema(&self) -> Result<(), HbnbError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| db_err("create schema", e))?;
        }
        debug!("MySQL schema ready");
        Ok(())
    }

    /// Linked amenity ids of a place, in link order
    async fn amenity_ids(&self, place_id: &str) -> Result<Vec<String>, HbnbError> {
        let rows =
            sqlx::query("SELECT amenity_id FROM place_amenity WHERE place_id = ? ORDER BY seq")
                .bind(place_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_err("load place amenities", e))?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("amenity_id"))
            .collect::<Result<_, _>>()
            .map_err(|e| db_err("decode place amenities", e))
    }

    /// Decode place rows and attach their amenity links
    async fn places_from_rows(&self, rows: &[MySqlRow]) -> Result<Vec<Place>, HbnbError> {
        let mut places = Vec::with_capacity(rows.len());
        for row in rows {
            let mut place = place_from_row(row).map_err(|e| db_err("decode place", e))?;
            place.amenity_ids = self.amenity_ids(&place.id).await?;
            places.push(place);
        }
        Ok(places)
    }

    async fn objects_from_rows(
        &self,
        kind: Kind,
        rows: &[MySqlRow],
    ) -> Result<Vec<Object>, HbnbError> {
        if kind == Kind::Place {
            let places = self.places_from_rows(rows).await?;
            return Ok(places.into_iter().map(Object::Place).collect());
        }

        rows.iter()
            .map(|row| object_from_row(kind, row))
            .collect::<Result<_, _>>()
            .map_err(|e| db_err("decode row", e))
    }
}

fn db_err(action: &str, e: sqlx::Error) -> HbnbError {
    HbnbError::Storage(format!("MySQL failed to {}: {}", action, e))
}

fn object_from_row(kind: Kind, row: &MySqlRow) -> Result<Object, sqlx::Error> {
    Ok(match kind {
        Kind::Amenity => Object::Amenity(Amenity {
            id: row.try_get("id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            name: row.try_get("name")?,
        }),
        Kind::City => Object::City(city_from_row(row)?),
        Kind::Place => Object::Place(place_from_row(row)?),
        Kind::State => Object::State(State {
            id: row.try_get("id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            name: row.try_get("name")?,
        }),
        Kind::User => Object::User(User {
            id: row.try_get("id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
        }),
    })
}

fn city_from_row(row: &MySqlRow) -> Result<City, sqlx::Error> {
    Ok(City {
        id: row.try_get("id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        state_id: row.try_get("state_id")?,
        name: row.try_get("name")?,
    })
}

/// Place columns only; `amenity_ids` is loaded separately
fn place_from_row(row: &MySqlRow) -> Result<Place, sqlx::Error> {
    Ok(Place {
        id: row.try_get("id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        city_id: row.try_get("city_id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        number_rooms: row.try_get("number_rooms")?,
        number_bathrooms: row.try_get("number_bathrooms")?,
        max_guest: row.try_get("max_guest")?,
        price_by_night: row.try_get("price_by_night")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        amenity_ids: Vec::new(),
    })
}

async fn upsert(tx: &mut Transaction<'_, MySql>, object: &Object) -> Result<(), sqlx::Error> {
    match object {
        Object::Amenity(a) => {
            sqlx::query(
                "INSERT INTO amenities (id, created_at, updated_at, name) VALUES (?, ?, ?, ?)
                 ON DUPLICATE KEY UPDATE updated_at = VALUES(updated_at), name = VALUES(name)",
            )
            .bind(&a.id)
            .bind(a.created_at)
            .bind(a.updated_at)
            .bind(&a.name)
            .execute(&mut **tx)
            .await?;
        }
        Object::City(c) => {
            sqlx::query(
                "INSERT INTO cities (id, created_at, updated_at, state_id, name) VALUES (?, ?, ?, ?, ?)
                 ON DUPLICATE KEY UPDATE updated_at = VALUES(updated_at), state_id = VALUES(state_id),
                 name = VALUES(name)",
            )
            .bind(&c.id)
            .bind(c.created_at)
            .bind(c.updated_at)
            .bind(&c.state_id)
            .bind(&c.name)
            .execute(&mut **tx)
            .await?;
        }
        Object::State(s) => {
            sqlx::query(
                "INSERT INTO states (id, created_at, updated_at, name) VALUES (?, ?, ?, ?)
                 ON DUPLICATE KEY UPDATE updated_at = VALUES(updated_at), name = VALUES(name)",
            )
            .bind(&s.id)
            .bind(s.created_at)
            .bind(s.updated_at)
            .bind(&s.name)
            .execute(&mut **tx)
            .await?;
        }
        Object::User(u) => {
            sqlx::query(
                "INSERT INTO users (id, created_at, updated_at, email, password, first_name, last_name)
                 VALUES (?, ?, ?, ?, ?, ?, ?)
                 ON DUPLICATE KEY UPDATE updated_at = VALUES(updated_at), email = VALUES(email),
                 password = VALUES(password), first_name = VALUES(first_name),
                 last_name = VALUES(last_name)",
            )
            .bind(&u.id)
            .bind(u.created_at)
            .bind(u.updated_at)
            .bind(&u.email)
            .bind(&u.password)
            .bind(&u.first_name)
            .bind(&u.last_name)
            .execute(&mut **tx)
            .await?;
        }
        Object::Place(p) => {
            sqlx::query(
                "INSERT INTO places (id, created_at, updated_at, city_id, user_id, name, description,
                 number_rooms, number_bathrooms, max_guest, price_by_night, latitude, longitude)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                 ON DUPLICATE KEY UPDATE updated_at = VALUES(updated_at), name = VALUES(name),
                 description = VALUES(description), number_rooms = VALUES(number_rooms),
                 number_bathrooms = VALUES(number_bathrooms), max_guest = VALUES(max_guest),
                 price_by_night = VALUES(price_by_night), latitude = VALUES(latitude),
                 longitude = VALUES(longitude)",
            )
            .bind(&p.id)
            .bind(p.created_at)
            .bind(p.updated_at)
            .bind(&p.city_id)
            .bind(&p.user_id)
            .bind(&p.name)
            .bind(&p.description)
            .bind(p.number_rooms)
            .bind(p.number_bathrooms)
            .bind(p.max_guest)
            .bind(p.price_by_night)
            .bind(p.latitude)
            .bind(p.longitude)
            .execute(&mut **tx)
            .await?;

            sync_links(tx, p).await?;
        }
    }
    Ok(())
}

/// Make `place_amenity` match `place.amenity_ids`, keeping existing link order
async fn sync_links(tx: &mut Transaction<'_, MySql>, place: &Place) -> Result<(), sqlx::Error> {
    let linked: Vec<String> = sqlx::query("SELECT amenity_id FROM place_amenity WHERE place_id = ?")
        .bind(&place.id)
        .fetch_all(&mut **tx)
        .await?
        .iter()
        .map(|row| row.try_get::<String, _>("amenity_id"))
        .collect::<Result<_, _>>()?;

    for stale in linked.iter().filter(|id| !place.has_amenity(id)) {
        sqlx::query("DELETE FROM place_amenity WHERE place_id = ? AND amenity_id = ?")
            .bind(&place.id)
            .bind(stale)
            .execute(&mut **tx)
            .await?;
    }

    for amenity_id in place.amenity_ids.iter().filter(|id| !linked.contains(id)) {
        sqlx::query("INSERT IGNORE INTO place_amenity (place_id, amenity_id) VALUES (?, ?)")
            .bind(&place.id)
            .bind(amenity_id)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

#[async_trait]
impl Storage for DbStorage {
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Object>, HbnbError> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", kind.collection());
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("get", e))?;

        match row {
            Some(row) => Ok(self
                .objects_from_rows(kind, std::slice::from_ref(&row))
                .await?
                .pop()),
            None => Ok(None),
        }
    }

    async fn all(&self, kind: Kind) -> Result<Vec<Object>, HbnbError> {
        let sql = format!("SELECT * FROM {} ORDER BY created_at, id", kind.collection());
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("list", e))?;

        self.objects_from_rows(kind, &rows).await
    }

    async fn count(&self, kind: Kind) -> Result<usize, HbnbError> {
        let sql = format!("SELECT COUNT(*) AS n FROM {}", kind.collection());
        let n: i64 = sqlx::query(&sql)
            .fetch_one(&self.pool)
            .await
            .and_then(|row| row.try_get("n"))
            .map_err(|e| db_err("count", e))?;
        Ok(usize::try_from(n).unwrap_or(0))
    }

    async fn save(&self, object: Object) -> Result<(), HbnbError> {
        let mut tx = self.pool.begin().await.map_err(|e| db_err("begin", e))?;
        upsert(&mut tx, &object).await.map_err(|e| db_err("save", e))?;
        tx.commit().await.map_err(|e| db_err("commit", e))
    }

    async fn delete(&self, kind: Kind, id: &str) -> Result<bool, HbnbError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", kind.collection());
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("delete", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn cities_of_state(&self, state_id: &str) -> Result<Vec<City>, HbnbError> {
        let rows = sqlx::query("SELECT * FROM cities WHERE state_id = ? ORDER BY created_at, id")
            .bind(state_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("list cities", e))?;

        rows.iter()
            .map(city_from_row)
            .collect::<Result<_, _>>()
            .map_err(|e| db_err("decode city", e))
    }

    async fn places_of_city(&self, city_id: &str) -> Result<Vec<Place>, HbnbError> {
        let rows = sqlx::query("SELECT * FROM places WHERE city_id = ? ORDER BY created_at, id")
            .bind(city_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("list places", e))?;

        self.places_from_rows(&rows).await
    }

    async fn amenities_of_place(&self, place: &Place) -> Result<Vec<Amenity>, HbnbError> {
        let rows = sqlx::query(
            "SELECT a.* FROM amenities a
             JOIN place_amenity pa ON pa.amenity_id = a.id
             WHERE pa.place_id = ? ORDER BY pa.seq",
        )
        .bind(&place.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("list amenities", e))?;

        rows.iter()
            .map(|row| match object_from_row(Kind::Amenity, row)? {
                Object::Amenity(amenity) => Ok(amenity),
                _ => Err(sqlx::Error::RowNotFound),
            })
            .collect::<Result<_, _>>()
            .map_err(|e| db_err("decode amenity", e))
    }

    async fn close(&self) -> Result<(), HbnbError> {
        self.pool.close().await;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), HbnbError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_err("health check", e))?;
        Ok(())
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Db
    }
}
