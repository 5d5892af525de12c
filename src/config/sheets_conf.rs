use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Google Sheets append-log configuration.
///
/// Submitted property forms are mirrored into one row of an external
/// spreadsheet. All three secrets are required; a missing one is reported
/// back as a failure on the submission request, never as a process crash.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Service account identity (client email)
    pub client_email: String,
    /// Service account private key (PEM)
    pub private_key: String,
    /// Target spreadsheet identifier
    pub sheet_id: String,
    /// Sheet range rows are appended under
    pub range: String,
}

impl SheetsConfig {
    /// Load Sheets configuration from environment variables
    ///
    /// Expected environment variables:
    /// - GOOGLE_CLIENT_EMAIL: service account email (required)
    /// - GOOGLE_PRIVATE_KEY: service account private key PEM, `\n` escaped (required)
    /// - GOOGLE_SHEET_ID: spreadsheet identifier (required)
    /// - GOOGLE_SHEET_RANGE: append range (defaults to "PROPERTY Sheet!A1")
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading Google Sheets configuration from environment variables");

        let client_email = env::var("GOOGLE_CLIENT_EMAIL")
            .map_err(|_| {
                error!("GOOGLE_CLIENT_EMAIL environment variable not found");
                ConfigError::EnvVarNotFound("GOOGLE_CLIENT_EMAIL".to_string())
            })?;
        debug!("Sheets client email: {}", client_email);

        // Keys pasted into env files usually arrive with literal "\n" sequences
        let private_key = env::var("GOOGLE_PRIVATE_KEY")
            .map_err(|_| {
                error!("GOOGLE_PRIVATE_KEY environment variable not found");
                ConfigError::EnvVarNotFound("GOOGLE_PRIVATE_KEY".to_string())
            })?
            .replace("\\n", "\n");
        debug!("Sheets private key loaded (length: {} chars)", private_key.len());

        let sheet_id = env::var("GOOGLE_SHEET_ID")
            .map_err(|_| {
                error!("GOOGLE_SHEET_ID environment variable not found");
                ConfigError::EnvVarNotFound("GOOGLE_SHEET_ID".to_string())
            })?;
        debug!("Sheets spreadsheet id: {}", sheet_id);

        let range = env::var("GOOGLE_SHEET_RANGE").unwrap_or_else(|_| {
            warn!("GOOGLE_SHEET_RANGE not set, using default: PROPERTY Sheet!A1");
            "PROPERTY Sheet!A1".to_string()
        });

        let config = SheetsConfig {
            client_email,
            private_key,
            sheet_id,
            range,
        };

        config.validate()?;
        info!("Google Sheets configuration loaded successfully");
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_email.is_empty() {
            return Err(ConfigError::ValidationError("Sheets client email cannot be empty".to_string()));
        }
        if self.private_key.is_empty() {
            return Err(ConfigError::ValidationError("Sheets private key cannot be empty".to_string()));
        }
        if self.sheet_id.is_empty() {
            return Err(ConfigError::ValidationError("Sheets spreadsheet id cannot be empty".to_string()));
        }
        Ok(())
    }
}
