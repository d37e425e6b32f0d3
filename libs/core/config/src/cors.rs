use crate::{env_required, ConfigError, FromEnv};

/// Origins allowed to call the API from a browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins }
    }
}

impl FromEnv for CorsConfig {
    /// CORS_ALLOWED_ORIGIN is required; multiple origins are comma separated.
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_required("CORS_ALLOWED_ORIGIN")?;
        let allowed_origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if allowed_origins.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: "at least one origin must be listed".to_string(),
            });
        }

        Ok(Self { allowed_origins })
    }
}
