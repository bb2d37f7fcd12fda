//! Live adapter for the `AssemblyCatalog` port using the assemblies search API.

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use crate::model::SearchResponse;
use crate::ports::{AssemblyCatalog, CatalogFuture, PortError};

const SEARCH_PATH: &str = "/api/v1/assemblies.v2.search";

/// Failure modes of an assemblies search call.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never produced a response.
    #[error("assemblies search request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("assemblies search returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The body was not a valid search response.
    #[error("failed to parse assemblies search response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Request body for `assemblies.v2.search`.
#[derive(Serialize)]
struct SearchRequest<'a> {
    oem_vehicle_id: &'a str,
}

/// Live catalog that calls `POST {base_url}/api/v1/assemblies.v2.search`.
pub struct HttpAssemblyCatalog {
    client: Client,
    endpoint: String,
    token: String,
}

impl HttpAssemblyCatalog {
    /// Creates a catalog client for the given API base URL and bearer token.
    pub fn new(base_url: &str, token: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, token)
    }

    /// Creates a catalog client reusing an existing `reqwest` client.
    pub fn with_client(client: Client, base_url: &str, token: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: search_endpoint(base_url),
            token: token.into(),
        }
    }

    async fn fetch(&self, vehicle_id: &str) -> Result<SearchResponse, CatalogError> {
        tracing::debug!(endpoint = %self.endpoint, vehicle_id, "searching assemblies");

        let request = SearchRequest {
            oem_vehicle_id: vehicle_id,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            diagrams = parsed.diagrams.len(),
            assemblies = parsed.assemblies.len(),
            "assemblies search complete"
        );
        Ok(parsed)
    }
}

impl AssemblyCatalog for HttpAssemblyCatalog {
    fn search(&self, vehicle_id: &str) -> CatalogFuture<'_> {
        let vehicle_id = vehicle_id.to_string();
        Box::pin(async move {
            self.fetch(&vehicle_id).await.map_err(PortError::from)
        })
    }
}

fn search_endpoint(base_url: &str) -> String {
    format!("{}{SEARCH_PATH}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        assert_eq!(
            search_endpoint("https://api.example.com/"),
            "https://api.example.com/api/v1/assemblies.v2.search"
        );
        assert_eq!(
            search_endpoint("https://api.example.com"),
            "https://api.example.com/api/v1/assemblies.v2.search"
        );
    }

    #[test]
    fn request_body_uses_oem_vehicle_id() {
        let request = SearchRequest {
            oem_vehicle_id: "VEH-1",
        };
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(body, serde_json::json!({ "oem_vehicle_id": "VEH-1" }));
    }

    #[test]
    fn status_error_mentions_code() {
        let err = CatalogError::Status {
            status: 401,
            body: "unauthorized".into(),
        };
        let expected = "assemblies search returned status 401: unauthorized";
        assert_eq!(err.to_string(), expected);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_request_error() {
        let catalog = HttpAssemblyCatalog::new("http://127.0.0.1:9", "token");
        let err = catalog.fetch("VEH-1").await.unwrap_err();
        assert!(matches!(err, CatalogError::Request(_)));
    }
}
