//! Request bodies for the three resource kinds

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::ResourceKind;

/// Body of `POST /workerprofiles`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub name: String,
    pub title: String,
    pub mobile: String,
    pub email: String,
    pub internal_identifier: String,
    pub role_names: Vec<String>,
    pub user_project_ids: Vec<Value>,
}

/// Body of `POST /projects`
///
/// Sheet values are passed through with their cell type, absent cells as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub is_archived: bool,
    pub name: Value,
    pub site_address: Value,
    pub region_id: Value,
    pub state: Value,
    pub time_zone_string: Value,
    pub country: Value,
    pub internal_identifier: Value,
    pub site_timing: Vec<SiteTiming>,
}

/// Opening hours for one weekday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteTiming {
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
}

/// Body of `POST /EmployerProfiles`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerProfilePayload {
    pub business_name: String,
    pub abn: String,
    pub addresses: Vec<Address>,
    pub internal_identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address_type: String,
    pub street_address: String,
    pub suburb: String,
    pub state: String,
    pub post_code: String,
    pub country: String,
}

/// A mapped row, ready to send
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    User(UserPayload),
    Project(ProjectPayload),
    EmployerProfile(EmployerProfilePayload),
}

impl Payload {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Payload::User(_) => ResourceKind::Users,
            Payload::Project(_) => ResourceKind::Projects,
            Payload::EmployerProfile(_) => ResourceKind::EmployerProfiles,
        }
    }

    /// Name shown in log lines
    pub fn label(&self) -> String {
        match self {
            Payload::User(user) => user.name.clone(),
            Payload::Project(project) => match &project.name {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            Payload::EmployerProfile(employer) => employer.business_name.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
