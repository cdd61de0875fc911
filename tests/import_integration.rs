//! `ImportService` integration tests.
//!
//! Tests the import pipeline against a recording mock API, focusing on:
//! - Create-vs-update decision from the target space ID
//! - Payload construction, including empty-string defaults
//! - Descriptive missing-file and malformed-file errors
//! - API error propagation with status and body

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use geniectl::api::{SpaceCreated, SpaceFetch, SpaceUpdated, SpacesApi};
use geniectl::models::{Environment, ImportPayload, SpaceId};
use geniectl::services::{ImportRequest, ImportService};
use geniectl::{Error, Result};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use test_case::test_case;

// ============================================================================
// Test Helpers
// ============================================================================

/// Recording mock of the Genie Spaces API.
struct MockSpacesApi {
    /// Responses to return for create calls, popped per call.
    create_responses: Mutex<Vec<Result<SpaceCreated>>>,
    /// Responses to return for update calls, popped per call.
    update_responses: Mutex<Vec<Result<SpaceUpdated>>>,
    /// Payloads of create calls.
    created: Mutex<Vec<ImportPayload>>,
    /// Target IDs and payloads of update calls.
    updated: Mutex<Vec<(SpaceId, ImportPayload)>>,
}

impl MockSpacesApi {
    fn new() -> Self {
        Self {
            create_responses: Mutex::new(Vec::new()),
            update_responses: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
        }
    }

    fn queue_update(&self, response: Result<SpaceUpdated>) {
        self.update_responses.lock().expect("lock").push(response);
    }

    fn create_count(&self) -> usize {
        self.created.lock().expect("lock").len()
    }

    fn update_count(&self) -> usize {
        self.updated.lock().expect("lock").len()
    }
}

impl SpacesApi for MockSpacesApi {
    fn fetch_space(&self, _space_id: &SpaceId) -> Result<SpaceFetch> {
        panic!("import must not fetch spaces");
    }

    fn create_space(&self, payload: &ImportPayload) -> Result<SpaceCreated> {
        self.created.lock().expect("lock").push(payload.clone());
        self.create_responses
            .lock()
            .expect("lock")
            .pop()
            .unwrap_or_else(|| {
                Ok(SpaceCreated {
                    status: 200,
                    space_id: SpaceId::new("01efnew1"),
                })
            })
    }

    fn update_space(&self, space_id: &SpaceId, payload: &ImportPayload) -> Result<SpaceUpdated> {
        self.updated
            .lock()
            .expect("lock")
            .push((space_id.clone(), payload.clone()));
        self.update_responses
            .lock()
            .expect("lock")
            .pop()
            .unwrap_or(Ok(SpaceUpdated { status: 200 }))
    }
}

/// Writes an export file for (`space_id`, env) into the temp dir.
fn write_export_file(temp: &TempDir, space_id: &str, env: &str, contents: &str) {
    let path = temp.path().join(format!("exported_{space_id}_{env}.json"));
    std::fs::write(path, contents).expect("write export file");
}

fn import_request(temp: &TempDir, target: Option<&str>) -> ImportRequest {
    ImportRequest {
        source_dir: temp.path().to_path_buf(),
        source_space_id: "01ef1234".to_string(),
        target_space_id: target.map(String::from),
        warehouse_id: "w1".to_string(),
        parent_path: "/p".to_string(),
        env: Environment::Stg,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_import_without_target_id_creates_a_space() {
    let temp = TempDir::new().expect("temp dir");
    write_export_file(
        &temp,
        "01ef1234",
        "stg",
        r#"{"serialized_space": "s", "title": "T"}"#,
    );

    let mock = Arc::new(MockSpacesApi::new());
    let service = ImportService::new(mock.clone());

    let outcome = service
        .import(&import_request(&temp, None))
        .expect("import");

    assert!(outcome.created);
    assert_eq!(outcome.status, 200);
    assert_eq!(outcome.space_id, SpaceId::new("01efnew1"));
    assert_eq!(mock.create_count(), 1);
    assert_eq!(mock.update_count(), 0);

    let created = mock.created.lock().expect("lock");
    assert_eq!(
        created[0],
        ImportPayload {
            warehouse_id: "w1".to_string(),
            parent_path: "/p".to_string(),
            serialized_space: "s".to_string(),
            title: "T".to_string(),
            description: String::new(),
        }
    );
}

#[test_case(Some("") ; "empty")]
#[test_case(Some("none") ; "lowercase none")]
#[test_case(Some("None") ; "capitalized none")]
#[test_case(None ; "absent")]
fn test_unset_target_id_means_create(target: Option<&str>) {
    let temp = TempDir::new().expect("temp dir");
    write_export_file(&temp, "01ef1234", "stg", r#"{"serialized_space": "s"}"#);

    let mock = Arc::new(MockSpacesApi::new());
    let service = ImportService::new(mock.clone());

    let outcome = service
        .import(&import_request(&temp, target))
        .expect("import");

    assert!(outcome.created);
    assert_eq!(mock.create_count(), 1);
    assert_eq!(mock.update_count(), 0);
}

#[test]
fn test_import_with_target_id_updates_the_space() {
    let temp = TempDir::new().expect("temp dir");
    write_export_file(&temp, "01ef1234", "stg", r#"{"serialized_space": "s"}"#);

    let mock = Arc::new(MockSpacesApi::new());
    let service = ImportService::new(mock.clone());

    let outcome = service
        .import(&import_request(&temp, Some("01ef9999")))
        .expect("import");

    assert!(!outcome.created);
    assert_eq!(outcome.space_id, SpaceId::new("01ef9999"));
    assert_eq!(mock.create_count(), 0);
    assert_eq!(mock.update_count(), 1);

    let updated = mock.updated.lock().expect("lock");
    assert_eq!(updated[0].0, SpaceId::new("01ef9999"));
    assert_eq!(updated[0].1.serialized_space, "s");
}

#[test]
fn test_missing_export_file_fails_with_descriptive_error() {
    let temp = TempDir::new().expect("temp dir");
    let mock = Arc::new(MockSpacesApi::new());
    let service = ImportService::new(mock.clone());

    let err = service
        .import(&import_request(&temp, None))
        .expect_err("missing file must fail");

    assert!(matches!(err, Error::ExportFileNotFound { .. }));
    assert!(err.to_string().contains("exported_01ef1234_stg.json"));
    assert_eq!(mock.create_count(), 0);
    assert_eq!(mock.update_count(), 0);
}

#[test]
fn test_export_file_without_serialized_space_fails_with_parse_error() {
    let temp = TempDir::new().expect("temp dir");
    write_export_file(&temp, "01ef1234", "stg", r#"{"title": "T"}"#);

    let mock = Arc::new(MockSpacesApi::new());
    let service = ImportService::new(mock.clone());

    let err = service
        .import(&import_request(&temp, None))
        .expect_err("malformed file must fail");

    assert!(matches!(err, Error::OperationFailed { .. }));
    assert!(err.to_string().contains("exported_01ef1234_stg.json"));
    assert_eq!(mock.create_count(), 0);
}

#[test]
fn test_missing_title_and_description_default_to_empty_strings() {
    let temp = TempDir::new().expect("temp dir");
    write_export_file(&temp, "01ef1234", "stg", r#"{"serialized_space": "s"}"#);

    let mock = Arc::new(MockSpacesApi::new());
    let service = ImportService::new(mock.clone());

    service
        .import(&import_request(&temp, None))
        .expect("import");

    let created = mock.created.lock().expect("lock");
    assert_eq!(created[0].title, "");
    assert_eq!(created[0].description, "");
}

#[test]
fn test_import_reads_the_file_for_the_requested_environment() {
    let temp = TempDir::new().expect("temp dir");
    write_export_file(&temp, "01ef1234", "stg", r#"{"serialized_space": "stg blob"}"#);
    write_export_file(&temp, "01ef1234", "prd", r#"{"serialized_space": "prd blob"}"#);

    let mock = Arc::new(MockSpacesApi::new());
    let service = ImportService::new(mock.clone());

    let mut request = import_request(&temp, None);
    request.env = Environment::Prd;
    service.import(&request).expect("import");

    let created = mock.created.lock().expect("lock");
    assert_eq!(created[0].serialized_space, "prd blob");
}

#[test]
fn test_import_propagates_api_error_with_status_and_body() {
    let temp = TempDir::new().expect("temp dir");
    write_export_file(&temp, "01ef1234", "stg", r#"{"serialized_space": "s"}"#);

    let mock = Arc::new(MockSpacesApi::new());
    mock.queue_update(Err(Error::Api {
        operation: "update_space".to_string(),
        status: 400,
        body: "INVALID_PARAMETER_VALUE".to_string(),
    }));
    let service = ImportService::new(mock);

    let err = service
        .import(&import_request(&temp, Some("01ef9999")))
        .expect_err("API failure must fail the import");

    let message = err.to_string();
    assert!(message.contains("400"));
    assert!(message.contains("INVALID_PARAMETER_VALUE"));
}
