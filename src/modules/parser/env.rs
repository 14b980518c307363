//! Environment variable substitution

use hbnb_core::HbnbError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Regex pattern for environment variable placeholders: {{ env.VAR_NAME }}
static ENV_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*env\.([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("valid env placeholder regex")
});

/// Environment variable substitutor; every referenced variable must be set
pub struct EnvSubstitutor;

impl EnvSubstitutor {
    pub fn new() -> Self {
        Self
    }

    /// Substitute environment variables in the given content
    pub fn substitute(&self, content: &str) -> Result<String, HbnbError> {
        load_dotenv();
        self.substitute_with(content, |name| std::env::var(name).ok())
    }

    /// Substitute placeholders using an explicit variable lookup
    pub fn substitute_with<F>(&self, content: &str, lookup: F) -> Result<String, HbnbError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing: Vec<String> = Vec::new();

        let result = ENV_PATTERN.replace_all(content, |cap: &regex::Captures<'_>| {
            let name = &cap[1];
            match lookup(name) {
                Some(value) => value,
                None => {
                    if !missing.iter().any(|m| m == name) {
                        missing.push(name.to_string());
                    }
                    cap[0].to_string()
                }
            }
        });

        if !missing.is_empty() {
            return Err(HbnbError::EnvVarNotFound(missing.join(", ")));
        }

        Ok(result.into_owned())
    }
}

impl Default for EnvSubstitutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a `.env` file from the working directory if present
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }
}
