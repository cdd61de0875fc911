//! Genie Spaces API abstraction.
//!
//! Provides a trait seam over the three REST calls the pipelines make, with
//! a blocking HTTP implementation and mock implementations in tests.

mod genie;

pub use genie::GenieClient;

use crate::Result;
use crate::models::{ImportPayload, SpaceDocument, SpaceId};
use std::time::Duration;

/// Response to a space fetch.
#[derive(Debug, Clone)]
pub struct SpaceFetch {
    /// HTTP status of the fetch (200 on success).
    pub status: u16,
    /// The full space document including the serialized blob.
    pub document: SpaceDocument,
}

/// Response to a space creation.
#[derive(Debug, Clone)]
pub struct SpaceCreated {
    /// HTTP status of the creation (200 on success).
    pub status: u16,
    /// Identifier of the newly created space.
    pub space_id: SpaceId,
}

/// Response to a space update.
#[derive(Debug, Clone)]
pub struct SpaceUpdated {
    /// HTTP status of the update (200 on success).
    pub status: u16,
}

/// Trait for Genie Spaces API backends.
///
/// Success is HTTP status 200 exactly; implementations raise `Error::Api`
/// with the status and response body for anything else.
pub trait SpacesApi: Send + Sync {
    /// Fetches a space with its serialized configuration included.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns a non-200 status.
    fn fetch_space(&self, space_id: &SpaceId) -> Result<SpaceFetch>;

    /// Creates a new space from an import payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns a non-200 status.
    fn create_space(&self, payload: &ImportPayload) -> Result<SpaceCreated>;

    /// Updates an existing space from an import payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns a non-200 status.
    fn update_space(&self, space_id: &SpaceId, payload: &ImportPayload) -> Result<SpaceUpdated>;
}

/// HTTP client configuration for Genie API requests.
#[derive(Debug, Clone, Copy)]
pub struct HttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 3_000,
        }
    }
}

impl HttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Loads HTTP configuration from config file settings.
    #[must_use]
    pub fn from_config(config: &crate::config::HttpSettings) -> Self {
        let mut settings = Self::default();
        if let Some(timeout_ms) = config.timeout_ms {
            settings.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) = config.connect_timeout_ms {
            settings.connect_timeout_ms = connect_timeout_ms;
        }
        settings
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("GENIECTL_TIMEOUT_MS") {
            if let Ok(timeout_ms) = v.parse::<u64>() {
                self.timeout_ms = timeout_ms;
            }
        }
        if let Ok(v) = std::env::var("GENIECTL_CONNECT_TIMEOUT_MS") {
            if let Ok(connect_timeout_ms) = v.parse::<u64>() {
                self.connect_timeout_ms = connect_timeout_ms;
            }
        }
        self
    }
}

/// Builds a blocking HTTP client for Genie API requests with configured
/// timeouts.
#[must_use]
pub fn build_http_client(config: HttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder()
        .user_agent(format!("geniectl/{}", env!("CARGO_PKG_VERSION")));
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build Genie HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}
