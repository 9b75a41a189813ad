//! HTTP client for creating resources

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::header::AUTHORIZATION;

use super::models::{Endpoints, Region, Token};
use super::operations::{Operation, OperationResult};

/// Something that can POST a create operation to the API
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Send one operation. Non-2xx responses come back as an unsuccessful
    /// `OperationResult`; only transport failures are `Err`.
    async fn execute(&self, token: &Token, operation: &Operation) -> Result<OperationResult>;
}

/// Build the shared reqwest client
pub fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder =
        reqwest::Client::builder().user_agent(concat!("hammertech-cli/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to build HTTP client")
}

/// Resource client for one region's API
#[derive(Debug, Clone)]
pub struct HammerTechClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl HammerTechClient {
    pub fn new(http: reqwest::Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    /// Client for a region, optionally pointed at another API host
    pub fn for_region(http: reqwest::Client, region: Region, api_host: Option<&str>) -> Self {
        Self::new(http, Endpoints::resolve(region, None, api_host))
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

#[async_trait]
impl ResourceClient for HammerTechClient {
    async fn execute(&self, token: &Token, operation: &Operation) -> Result<OperationResult> {
        let url = operation.url(&self.endpoints);
        debug!("{} {}", operation.http_method(), url);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, token.bearer())
            .json(&operation.data)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;

        debug!("{} answered HTTP {}", url, status);
        Ok(OperationResult::from_response(operation.clone(), status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ResourceKind;
    use crate::api::test_server::serve_once;
    use serde_json::json;

    fn client_for(base_url: &str) -> HammerTechClient {
        HammerTechClient::for_region(reqwest::Client::new(), Region::EuropeUk, Some(base_url))
    }

    #[tokio::test]
    async fn test_execute_posts_with_bearer_token() {
        let server = serve_once(201, r#"{"id": 42}"#).await;
        let client = client_for(&server.base_url);
        let operation = Operation::create(
            ResourceKind::EmployerProfiles,
            json!({"businessName": "Acme"}),
        );

        let result = client
            .execute(&Token::new("test-token"), &operation)
            .await
            .unwrap();
        let request = server.request.await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.status_code, 201);
        assert_eq!(result.body, r#"{"id": 42}"#);
        assert!(request.starts_with("POST /api/v1/EmployerProfiles HTTP/1.1"));
        assert!(
            request
                .to_ascii_lowercase()
                .contains("authorization: bearer test-token")
        );
        assert!(request.ends_with(r#"{"businessName":"Acme"}"#));
    }

    #[tokio::test]
    async fn test_execute_returns_server_error_as_result() {
        let server = serve_once(500, "server error").await;
        let client = client_for(&server.base_url);
        let operation = Operation::create(ResourceKind::Users, json!({"email": "a@b.com"}));

        let result = client
            .execute(&Token::new("test-token"), &operation)
            .await
            .unwrap();
        let request = server.request.await.unwrap();

        assert!(!result.is_success());
        assert_eq!(result.status_code, 500);
        assert_eq!(result.body, "server error");
        assert!(request.starts_with("POST /api/v1/workerprofiles HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_execute_connection_refused_is_err() {
        let client = client_for("http://127.0.0.1:1");
        let operation = Operation::create(ResourceKind::Projects, json!({"name": "Site A"}));

        assert!(client.execute(&Token::new("t"), &operation).await.is_err());
    }
}
