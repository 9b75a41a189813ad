//! Create operation and its result

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::models::{Endpoints, ResourceKind};

/// A single create request against a resource collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Target collection
    pub resource: ResourceKind,
    /// Request body
    pub data: Value,
}

/// Result of executing an Operation
///
/// A non-2xx response is still a result; only transport failures are errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    /// The operation that was executed
    pub operation: Operation,
    /// Whether the API answered with a 2xx status
    pub success: bool,
    /// HTTP status code from the response
    pub status_code: u16,
    /// Raw response body
    pub body: String,
}

impl Operation {
    pub fn create(resource: ResourceKind, data: Value) -> Self {
        Self { resource, data }
    }

    pub fn http_method(&self) -> &'static str {
        "POST"
    }

    /// Full URL this operation is sent to
    pub fn url(&self, endpoints: &Endpoints) -> String {
        endpoints.resource_url(self.resource)
    }
}

impl OperationResult {
    /// Classify a response by its status code
    pub fn from_response(operation: Operation, status_code: u16, body: String) -> Self {
        Self {
            operation,
            success: (200..300).contains(&status_code),
            status_code,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_classification() {
        let op = Operation::create(ResourceKind::Projects, json!({"name": "Site A"}));

        assert!(OperationResult::from_response(op.clone(), 200, String::new()).is_success());
        assert!(OperationResult::from_response(op.clone(), 201, String::new()).is_success());
        assert!(OperationResult::from_response(op.clone(), 299, String::new()).is_success());
        assert!(!OperationResult::from_response(op.clone(), 302, String::new()).is_success());
        assert!(!OperationResult::from_response(op.clone(), 400, String::new()).is_success());
        assert!(!OperationResult::from_response(op, 500, "server error".into()).is_success());
    }
}
