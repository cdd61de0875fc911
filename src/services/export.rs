//! Space export service.
//!
//! Fetches a serialized space once and writes one retargeted copy per
//! environment under a deterministic directory.

use crate::api::SpacesApi;
use crate::models::{Environment, SpaceId, export_file_name, is_unset};
use crate::rewrite::retarget_document;
use crate::{Error, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Parameters for a space export.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Source space ID, as supplied by the deployment parameters.
    pub source_space_id: String,
    /// Folder name of the Genie space (e.g. `Pipeline_overview`).
    pub genie_name: String,
    /// Root directory of the repository the files are written into.
    pub root_dir: PathBuf,
    /// Path to the Genie folder relative to the root
    /// (e.g. `src/sales_genie_spaces`).
    pub genie_folder: PathBuf,
}

impl ExportRequest {
    /// Returns the directory the exported files are written into.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.root_dir.join(&self.genie_folder).join(&self.genie_name)
    }
}

/// Result of a space export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// HTTP status of the fetch (200 on success).
    pub status: u16,
    /// Paths of the written files, one per environment.
    pub written: Vec<PathBuf>,
}

/// Service for exporting spaces to environment-retargeted files.
pub struct ExportService {
    /// API backend the fetch goes through.
    api: Arc<dyn SpacesApi>,
}

impl ExportService {
    /// Creates a new export service.
    #[must_use]
    pub fn new(api: Arc<dyn SpacesApi>) -> Self {
        Self { api }
    }

    /// Exports a space, writing exactly one file per environment.
    ///
    /// Existing files at the target paths are overwritten. The output
    /// directory is created if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the source space ID is unset, the fetch returns a
    /// non-200 status, or a file cannot be written.
    pub fn export(&self, request: &ExportRequest) -> Result<ExportOutcome> {
        if is_unset(&request.source_space_id) {
            return Err(Error::InvalidInput(format!(
                "please provide a valid genie space id for genie name: {}",
                request.genie_name
            )));
        }
        let source_id = SpaceId::new(request.source_space_id.clone());

        let fetch = self.api.fetch_space(&source_id)?;

        let out_dir = request.output_dir();
        std::fs::create_dir_all(&out_dir).map_err(|e| Error::OperationFailed {
            operation: "create_export_dir".to_string(),
            cause: format!("{}: {e}", out_dir.display()),
        })?;

        let mut written = Vec::with_capacity(Environment::all().len());
        for &env in Environment::all() {
            let retargeted = retarget_document(&fetch.document, env)?;
            let text = serde_json::to_string(&retargeted).map_err(|e| Error::OperationFailed {
                operation: "serialize_export_file".to_string(),
                cause: e.to_string(),
            })?;

            let path = out_dir.join(export_file_name(&source_id, env));
            std::fs::write(&path, text).map_err(|e| Error::OperationFailed {
                operation: "write_export_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

            tracing::info!(space_id = %source_id, env = %env, path = %path.display(), "Wrote export file");
            written.push(path);
        }

        Ok(ExportOutcome {
            status: fetch.status,
            written,
        })
    }
}
