//! HammerTech REST API module
//!
//! Region endpoints, token exchange and the resource client used by the
//! upload runner.

pub mod auth;
pub mod client;
pub mod constants;
pub mod models;
pub mod operations;

#[cfg(test)]
pub(crate) mod test_server;

pub use auth::{AuthError, AuthManager, Authenticator};
pub use client::{HammerTechClient, ResourceClient, build_http_client};
pub use models::{Credentials, Endpoints, Region, ResourceKind, Token};
pub use operations::{Operation, OperationResult};
