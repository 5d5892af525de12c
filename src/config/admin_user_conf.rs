use std::env;
use tracing::{debug, error, info};

use crate::config::ConfigError;

/// Bootstrap credentials for the first admin profile.
///
/// Optional: when the variables are absent the application starts without
/// creating an admin and role changes must wait for a manual promotion.
#[derive(Debug, Clone)]
pub struct AdminUserConfig {
    pub email: String,
    pub password: String,
}

impl AdminUserConfig {
    /// Load admin bootstrap configuration from environment variables
    ///
    /// Expected environment variables:
    /// - ADMIN_EMAIL: first admin email (required)
    /// - ADMIN_PASSWORD: first admin password (required)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading admin bootstrap configuration from environment variables");

        let email = env::var("ADMIN_EMAIL")
            .map_err(|_| ConfigError::EnvVarNotFound("ADMIN_EMAIL".to_string()))?;
        let password = env::var("ADMIN_PASSWORD")
            .map_err(|_| ConfigError::EnvVarNotFound("ADMIN_PASSWORD".to_string()))?;

        if email.is_empty() || !email.contains('@') {
            error!("ADMIN_EMAIL is not a valid email address");
            return Err(ConfigError::InvalidValue("ADMIN_EMAIL must be a valid email".to_string()));
        }
        if password.len() < 8 {
            error!("ADMIN_PASSWORD is too short (minimum 8 characters)");
            return Err(ConfigError::InvalidValue("ADMIN_PASSWORD must be at least 8 characters".to_string()));
        }

        debug!("Admin bootstrap email: {}", email);
        Ok(AdminUserConfig { email, password })
    }
}
