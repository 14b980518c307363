//! Storage engine type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported storage engines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// JSON file on disk
    #[default]
    File,
    /// MySQL database
    Db,
    /// Process-local, nothing persisted
    Memory,
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageType::File => write!(f, "file"),
            StorageType::Db => write!(f, "db"),
            StorageType::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "json" => Ok(StorageType::File),
            "db" | "mysql" => Ok(StorageType::Db),
            "memory" | "mem" => Ok(StorageType::Memory),
            _ => Err(format!("Unknown storage type: {}", s)),
        }
    }
}

impl StorageType {
    /// Returns true if objects outlive the process
    pub fn is_persistent(&self) -> bool {
        !matches!(self, StorageType::Memory)
    }
}
