//! Space import service.
//!
//! Reads a previously exported file and either creates a new space or
//! updates an existing one, depending on whether a target space ID was
//! supplied.

use crate::api::SpacesApi;
use crate::models::{Environment, ImportPayload, SpaceExport, SpaceId, export_file_name};
use crate::{Error, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Parameters for a space import.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Directory containing the exported file.
    pub source_dir: PathBuf,
    /// Source space ID the file was exported from.
    pub source_space_id: String,
    /// Target space ID; unset (absent, empty, or `none`) means a new space
    /// is created.
    pub target_space_id: Option<String>,
    /// SQL warehouse ID used for space creation.
    pub warehouse_id: String,
    /// Workspace folder a newly created space lands under.
    pub parent_path: String,
    /// Environment whose exported file is imported.
    pub env: Environment,
}

impl ImportRequest {
    /// Returns the path of the exported file this import reads.
    ///
    /// The source ID is not pre-validated; an unset value simply produces a
    /// file name that will not be found.
    #[must_use]
    pub fn export_file_path(&self) -> PathBuf {
        let source_id = SpaceId::new(self.source_space_id.clone());
        self.source_dir.join(export_file_name(&source_id, self.env))
    }

    /// Returns the target space ID when one was usably supplied.
    #[must_use]
    fn target_id(&self) -> Option<SpaceId> {
        SpaceId::from_param(self.target_space_id.as_deref())
    }
}

/// Result of a space import.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// HTTP status of the create or update call (200 on success).
    pub status: u16,
    /// The created or updated space ID.
    pub space_id: SpaceId,
    /// True when a new space was created, false when one was updated.
    pub created: bool,
}

/// Service for importing exported spaces into a target workspace.
pub struct ImportService {
    /// API backend the create/update goes through.
    api: Arc<dyn SpacesApi>,
}

impl ImportService {
    /// Creates a new import service.
    #[must_use]
    pub fn new(api: Arc<dyn SpacesApi>) -> Self {
        Self { api }
    }

    /// Imports the exported file for the requested (space, environment)
    /// pair, creating or updating a space.
    ///
    /// # Errors
    ///
    /// Returns an error if the export file is missing or unreadable, its
    /// JSON lacks `serialized_space`, or the API call returns a non-200
    /// status.
    pub fn import(&self, request: &ImportRequest) -> Result<ImportOutcome> {
        let path = request.export_file_path();

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ExportFileNotFound {
                    space_id: request.source_space_id.clone(),
                    env: request.env.to_string(),
                    path: path.display().to_string(),
                }
            } else {
                Error::OperationFailed {
                    operation: "read_export_file".to_string(),
                    cause: format!("{}: {e}", path.display()),
                }
            }
        })?;

        let export: SpaceExport =
            serde_json::from_str(&contents).map_err(|e| Error::OperationFailed {
                operation: "parse_export_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        let payload = ImportPayload::from_export(
            export,
            request.warehouse_id.clone(),
            request.parent_path.clone(),
        );

        match request.target_id() {
            Some(target_id) => {
                let updated = self.api.update_space(&target_id, &payload)?;
                tracing::info!(space_id = %target_id, env = %request.env, "Updated Genie space");
                Ok(ImportOutcome {
                    status: updated.status,
                    space_id: target_id,
                    created: false,
                })
            },
            None => {
                let created = self.api.create_space(&payload)?;
                tracing::info!(space_id = %created.space_id, env = %request.env, "Created Genie space");
                Ok(ImportOutcome {
                    status: created.status,
                    space_id: created.space_id,
                    created: true,
                })
            },
        }
    }
}
