//! Environment configuration for different deployment stages

use std::env;
use std::fmt;

use tracing::Level;

use crate::b2::{UploadError, UploadResult};

/// Bucket used when `BACKBLAZE_BUCKET_NAME` is not set
pub const DEFAULT_BUCKET_NAME: &str = "lovesent-photos";

/// Base URL of the B2 account authorization endpoint
pub const DEFAULT_API_URL: &str = "https://api.backblazeb2.com";

/// Application environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// Default tracing level, overridable with `TRACING_LEVEL`
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}

/// Backblaze settings as read from the process environment.
///
/// Every field is optional here; missing credentials only become an error
/// when an upload is attempted.
#[derive(Clone, Default)]
pub struct StorageEnv {
    /// `BACKBLAZE_KEY_ID`
    pub key_id: Option<String>,
    /// `BACKBLAZE_APP_KEY`
    pub app_key: Option<String>,
    /// `BACKBLAZE_BUCKET_NAME`
    pub bucket_name: Option<String>,
    /// `BACKBLAZE_API_URL`, base URL used for account authorization
    pub api_url: Option<String>,
}

impl StorageEnv {
    /// Reads the storage settings from the process environment.
    ///
    /// Empty values are treated as unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            key_id: non_empty_var("BACKBLAZE_KEY_ID"),
            app_key: non_empty_var("BACKBLAZE_APP_KEY"),
            bucket_name: non_empty_var("BACKBLAZE_BUCKET_NAME"),
            api_url: non_empty_var("BACKBLAZE_API_URL"),
        }
    }

    /// Authorization base URL, without trailing slash
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
    }

    /// Resolves the credentials needed for an upload
    ///
    /// # Errors
    ///
    /// Returns `UploadError::NotConfigured` if the key id or the application key is missing
    pub fn credentials(&self) -> UploadResult<Credentials> {
        let key_id = self.key_id.as_deref().unwrap_or_default();
        let app_key = self.app_key.as_deref().unwrap_or_default();

        if key_id.is_empty() || app_key.is_empty() {
            return Err(UploadError::NotConfigured);
        }

        let bucket_name = self
            .bucket_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_BUCKET_NAME);

        Ok(Credentials {
            key_id: key_id.to_string(),
            app_key: app_key.to_string(),
            bucket_name: bucket_name.to_string(),
        })
    }
}

impl fmt::Debug for StorageEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageEnv")
            .field("key_id", &self.key_id)
            .field("app_key", &self.app_key.as_ref().map(|_| "<redacted>"))
            .field("bucket_name", &self.bucket_name)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Credentials for a single upload
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Application key id
    pub key_id: String,
    /// Application key secret
    pub app_key: String,
    /// Target bucket name
    pub bucket_name: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("app_key", &"<redacted>")
            .field("bucket_name", &self.bucket_name)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|val| !val.trim().is_empty())
}
