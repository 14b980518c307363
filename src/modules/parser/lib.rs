//! Configuration loading for the HBnB API
//!
//! This crate handles parsing of the optional YAML configuration file,
//! `{{ env.VAR }}` substitution, `HBNB_*` environment overrides and
//! validation.

pub mod env;
pub mod overrides;
pub mod validator;
pub mod yaml;

pub use overrides::apply_env_overrides;
pub use validator::ConfigValidator;
pub use yaml::YamlParser;

use hbnb_core::{HbnbError, Settings};
use std::path::Path;
use tracing::info;

/// Parse a configuration file, substituting `{{ env.VAR }}` placeholders.
///
/// The result is not validated; overrides may still complete it.
pub fn parse_file(path: &str) -> Result<Settings, HbnbError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| HbnbError::Config(format!("Failed to read file '{}': {}", path, e)))?;

    YamlParser::parse(&content)
}

/// Load settings for the service.
///
/// The file is optional: when it does not exist every default applies. The
/// `HBNB_*` environment overrides are applied on top and the result is
/// validated.
pub fn load(path: &str) -> Result<Settings, HbnbError> {
    env::load_dotenv();

    let mut settings = if Path::new(path).exists() {
        info!("Loading configuration from: {}", path);
        parse_file(path)?
    } else {
        info!("No configuration file at {}, using defaults", path);
        Settings::default()
    };

    apply_env_overrides(&mut settings)?;
    ConfigValidator::new().validate(&settings)?;

    Ok(settings)
}
