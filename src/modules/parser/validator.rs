//! Configuration validation

use hbnb_core::{HbnbError, Settings};
use hbnb_types::StorageType;
use once_cell::sync::Lazy;
use regex::Regex;

/// Regex pattern for valid names (lower-kebab-case or lower_snake_case)
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*(?:[-_][a-z0-9]+)*$").expect("valid name regex")
});

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate the entire configuration
    pub fn validate(&self, settings: &Settings) -> Result<(), HbnbError> {
        self.validate_name(&settings.name)?;
        self.validate_server(settings)?;
        self.validate_storage(settings)?;
        Ok(())
    }

    fn validate_name(&self, name: &str) -> Result<(), HbnbError> {
        if name.is_empty() {
            return Err(HbnbError::Validation(
                "Service name cannot be empty".to_string(),
            ));
        }

        if !NAME_PATTERN.is_match(name) {
            return Err(HbnbError::Validation(format!(
                "Invalid service name '{}': must be lower-kebab-case or lower_snake_case",
                name
            )));
        }

        Ok(())
    }

    fn validate_server(&self, settings: &Settings) -> Result<(), HbnbError> {
        if settings.port() == 0 {
            return Err(HbnbError::Validation("Port cannot be 0".to_string()));
        }

        if settings.host().trim().is_empty() {
            return Err(HbnbError::Validation("Host cannot be empty".to_string()));
        }

        if settings.log_level() > 3 {
            return Err(HbnbError::Validation(format!(
                "Invalid log level {}: expected 0-3",
                settings.log_level()
            )));
        }

        Ok(())
    }

    fn validate_storage(&self, settings: &Settings) -> Result<(), HbnbError> {
        let storage = &settings.storage;

        match storage.storage_type {
            StorageType::Db => match storage.url.as_deref() {
                None | Some("") => Err(HbnbError::Validation(
                    "db storage requires a url (storage.url or HBNB_MYSQL_* variables)"
                        .to_string(),
                )),
                Some(url) if !url.starts_with("mysql://") => Err(HbnbError::Validation(
                    "db storage url must start with mysql://".to_string(),
                )),
                Some(_) => Ok(()),
            },
            StorageType::File if storage.path().trim().is_empty() => Err(
                HbnbError::Validation("file storage path cannot be empty".to_string()),
            ),
            StorageType::File | StorageType::Memory => Ok(()),
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
