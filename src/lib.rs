//! # geniectl
//!
//! Promotes Databricks Genie Spaces between workspace environments.
//!
//! A Genie Space carries a serialized configuration blob with
//! environment-suffixed identifiers (`_dev`, `_tst`, `_stg`, `_prd`). The
//! export pipeline fetches a space once and writes one retargeted JSON file
//! per environment; the import pipeline reads one of those files and either
//! creates a new space or updates an existing one through the Genie REST API.
//!
//! ## Example
//!
//! ```rust,ignore
//! use geniectl::{ExportRequest, ExportService, GenieClient};
//!
//! let client = GenieClient::new(host, token);
//! let service = ExportService::new(Arc::new(client));
//! let outcome = service.export(&ExportRequest {
//!     source_space_id: "01ef1234".to_string(),
//!     genie_name: "Pipeline_overview".to_string(),
//!     root_dir: "/repo".into(),
//!     genie_folder: "src/sales_genie_spaces".into(),
//! })?;
//! ```

use thiserror::Error as ThisError;

// Module declarations
pub mod api;
pub mod config;
pub mod models;
pub mod rewrite;
pub mod services;

// Re-exports for convenience
pub use api::{GenieClient, HttpConfig, SpacesApi};
pub use config::GenieConfig;
pub use models::{Environment, ImportPayload, SpaceExport, SpaceId};
pub use services::{ExportRequest, ExportService, ImportRequest, ImportService};

/// Error type for geniectl operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Unset space IDs, unknown environment names, missing host/token |
/// | `Api` | The Genie API returns any status other than 200 |
/// | `ExportFileNotFound` | Import cannot find the exported file for a (space, env) pair |
/// | `OperationFailed` | I/O errors, network transport failures, JSON parse failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A source space ID is empty or the placeholder `none`
    /// - An environment name is not one of `dev`, `tst`, `stg`, `prd`
    /// - No host or token could be resolved from flags, environment, or config
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The Genie API returned a non-success status.
    ///
    /// Success is status 200 exactly; any other status raises this variant
    /// with the response body embedded.
    #[error("operation '{operation}' failed with status {status}: {body}")]
    Api {
        /// The API operation that failed.
        operation: String,
        /// The HTTP status code returned.
        status: u16,
        /// The response body text.
        body: String,
    },

    /// A previously exported file could not be found on import.
    #[error(
        "export file not found for space '{space_id}' in environment '{env}': expected {path}"
    )]
    ExportFileNotFound {
        /// The source space ID used to derive the file name.
        space_id: String,
        /// The environment tag used to derive the file name.
        env: String,
        /// The path that was probed.
        path: String,
    },

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem I/O errors occur while reading or writing export files
    /// - The HTTP transport fails (timeout, connect, request errors)
    /// - JSON serialization or deserialization fails
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for geniectl operations.
pub type Result<T> = std::result::Result<T, Error>;
