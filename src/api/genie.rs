//! Blocking HTTP client for the Databricks Genie Spaces API.

use super::{HttpConfig, SpaceCreated, SpaceFetch, SpaceUpdated, SpacesApi, build_http_client};
use crate::models::{ImportPayload, SpaceDocument, SpaceId};
use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Genie Spaces API client over `reqwest::blocking`.
///
/// Authenticates every call with a bearer token. All calls treat HTTP 200
/// as the only success status, matching the API's documented behavior for
/// these endpoints.
pub struct GenieClient {
    /// Workspace base URL, without a trailing slash.
    host: String,
    /// Pre-resolved bearer token.
    token: SecretString,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl GenieClient {
    /// Creates a new client for the given workspace host and token.
    #[must_use]
    pub fn new(host: impl Into<String>, token: SecretString) -> Self {
        let host = host.into().trim_end_matches('/').to_string();
        Self {
            host,
            token,
            client: build_http_client(HttpConfig::from_env()),
        }
    }

    /// Sets HTTP client timeouts for API requests.
    #[must_use]
    pub fn with_http_config(mut self, config: HttpConfig) -> Self {
        self.client = build_http_client(config);
        self
    }

    /// Returns the URL of the spaces collection endpoint.
    fn spaces_url(&self) -> String {
        format!("{}/api/2.0/genie/spaces/", self.host)
    }

    /// Returns the URL of a single space endpoint.
    fn space_url(&self, space_id: &SpaceId) -> String {
        format!("{}/api/2.0/genie/spaces/{space_id}", self.host)
    }

    /// Sends a prepared request, mapping transport failures to errors.
    fn send(
        &self,
        operation: &str,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<reqwest::blocking::Response> {
        request
            .header(
                "Authorization",
                format!("Bearer {}", self.token.expose_secret()),
            )
            .send()
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connect"
                } else if e.is_request() {
                    "request"
                } else {
                    "unknown"
                };
                tracing::error!(
                    operation = operation,
                    error = %e,
                    error_kind = error_kind,
                    "Genie API request failed"
                );
                Error::OperationFailed {
                    operation: operation.to_string(),
                    cause: format!("{error_kind} error: {e}"),
                }
            })
    }

    /// Rejects any response whose status is not exactly 200, embedding the
    /// status and body in the error.
    fn check_status(
        operation: &str,
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response> {
        let status = response.status().as_u16();
        if status == 200 {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        tracing::error!(
            operation = operation,
            status = status,
            body = %body,
            "Genie API returned error status"
        );
        Err(Error::Api {
            operation: operation.to_string(),
            status,
            body,
        })
    }

    /// Parses a response body as JSON.
    fn parse_json<T: serde::de::DeserializeOwned>(
        operation: &str,
        response: reqwest::blocking::Response,
    ) -> Result<T> {
        response.json().map_err(|e| {
            tracing::error!(operation = operation, error = %e, "Failed to parse Genie API response");
            Error::OperationFailed {
                operation: operation.to_string(),
                cause: e.to_string(),
            }
        })
    }
}

impl SpacesApi for GenieClient {
    fn fetch_space(&self, space_id: &SpaceId) -> Result<SpaceFetch> {
        const OPERATION: &str = "fetch_space";

        tracing::info!(space_id = %space_id, "Fetching Genie space");

        let url = format!("{}?include_serialized_space=true", self.space_url(space_id));
        let response = self.send(OPERATION, self.client.get(url))?;
        let response = Self::check_status(OPERATION, response)?;
        let status = response.status().as_u16();
        let document: SpaceDocument = Self::parse_json(OPERATION, response)?;

        Ok(SpaceFetch { status, document })
    }

    fn create_space(&self, payload: &ImportPayload) -> Result<SpaceCreated> {
        const OPERATION: &str = "create_space";

        tracing::info!(warehouse_id = %payload.warehouse_id, "Creating Genie space");

        let response = self.send(OPERATION, self.client.post(self.spaces_url()).json(payload))?;
        let response = Self::check_status(OPERATION, response)?;
        let status = response.status().as_u16();
        let created: CreateSpaceResponse = Self::parse_json(OPERATION, response)?;

        Ok(SpaceCreated {
            status,
            space_id: SpaceId::new(created.space_id),
        })
    }

    fn update_space(&self, space_id: &SpaceId, payload: &ImportPayload) -> Result<SpaceUpdated> {
        const OPERATION: &str = "update_space";

        tracing::info!(space_id = %space_id, "Updating Genie space");

        let response = self.send(
            OPERATION,
            self.client.patch(self.space_url(space_id)).json(payload),
        )?;
        let response = Self::check_status(OPERATION, response)?;

        Ok(SpaceUpdated {
            status: response.status().as_u16(),
        })
    }
}

/// Response body of a space creation.
#[derive(Debug, Deserialize)]
struct CreateSpaceResponse {
    space_id: String,
}
