//! Token exchange against the regional auth endpoint

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::ACCEPT;
use serde_json::{Value, json};

use super::models::{Credentials, Endpoints, Token};

/// Errors that stop a run before any row is uploaded
#[derive(Debug)]
pub enum AuthError {
    /// The request never produced a response (DNS, TLS, connection refused, timeout)
    Request(reqwest::Error),
    /// The auth endpoint answered with a non-2xx status
    Status { status: u16, body: String },
    /// The response body was not JSON
    InvalidResponse(String),
    /// 2xx response without a usable `token` field
    MissingToken,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Request(err) => write!(f, "request to auth endpoint failed: {}", err),
            AuthError::Status { status, body } if body.trim().is_empty() => {
                write!(f, "auth endpoint returned HTTP {}", status)
            }
            AuthError::Status { status, body } => {
                write!(f, "auth endpoint returned HTTP {}: {}", status, body.trim())
            }
            AuthError::InvalidResponse(msg) => write!(f, "invalid auth response: {}", msg),
            AuthError::MissingToken => write!(
                f,
                "no token found in response, check credentials / tenant"
            ),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Request(err) => Some(err),
            _ => None,
        }
    }
}

/// Exchanges credentials for a bearer token
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Token, AuthError>;
}

/// Authenticator backed by the HammerTech login endpoint
#[derive(Debug, Clone)]
pub struct AuthManager {
    http: reqwest::Client,
    auth_host_override: Option<String>,
}

impl AuthManager {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            auth_host_override: None,
        }
    }

    /// Send token requests to another host instead of the region's auth host
    pub fn with_auth_host(mut self, host: Option<String>) -> Self {
        self.auth_host_override = host;
        self
    }

    fn token_url(&self, credentials: &Credentials) -> String {
        Endpoints::resolve(credentials.region, self.auth_host_override.as_deref(), None).auth_url
    }
}

#[async_trait]
impl Authenticator for AuthManager {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Token, AuthError> {
        let url = self.token_url(credentials);
        info!(
            "Requesting token for {} (tenant {}) from {}",
            credentials.email, credentials.tenant, url
        );

        let body = json!({
            "email": credentials.email,
            "password": credentials.password,
            "tenant": credentials.tenant,
        });

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(AuthError::Request)?;

        let status = response.status();
        let text = response.text().await.map_err(AuthError::Request)?;
        debug!("Auth endpoint answered HTTP {}", status.as_u16());

        if !status.is_success() {
            return Err(AuthError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_token_response(&text)
    }
}

/// Extract the bearer token from a successful auth response body
pub fn parse_token_response(body: &str) -> Result<Token, AuthError> {
    let data: Value =
        serde_json::from_str(body).map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

    match data.get("token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => Ok(Token::new(token)),
        _ => Err(AuthError::MissingToken),
    }
}
