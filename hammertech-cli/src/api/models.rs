//! Core models for talking to the HammerTech API

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::constants::{API_VERSION_PATH, AUTH_TOKEN_PATH, hosts, resources};

/// HammerTech hosting region. Each region has its own auth and API hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    #[serde(alias = "North America")]
    NorthAmerica,
    #[serde(alias = "Asia/Australia/NZ")]
    AsiaAustraliaNz,
    #[serde(alias = "Europe/UK")]
    EuropeUk,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::NorthAmerica, Region::AsiaAustraliaNz, Region::EuropeUk];

    /// Human readable name, as shown on the HammerTech login page
    pub fn display_name(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::AsiaAustraliaNz => "Asia/Australia/NZ",
            Region::EuropeUk => "Europe/UK",
        }
    }

    /// Command-line identifier (e.g. "north-america")
    pub fn slug(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "north-america",
            Region::AsiaAustraliaNz => "asia-australia-nz",
            Region::EuropeUk => "europe-uk",
        }
    }

    pub fn auth_host(&self) -> &'static str {
        match self {
            Region::NorthAmerica => hosts::NORTH_AMERICA_AUTH,
            Region::AsiaAustraliaNz => hosts::ASIA_AUSTRALIA_NZ_AUTH,
            Region::EuropeUk => hosts::EUROPE_UK_AUTH,
        }
    }

    pub fn api_host(&self) -> &'static str {
        match self {
            Region::NorthAmerica => hosts::NORTH_AMERICA_API,
            Region::AsiaAustraliaNz => hosts::ASIA_AUSTRALIA_NZ_API,
            Region::EuropeUk => hosts::EUROPE_UK_API,
        }
    }

    /// Parse either the slug or the display name, ignoring case
    pub fn from_name(name: &str) -> Option<Region> {
        let name = name.trim();
        Region::ALL.into_iter().find(|region| {
            region.slug().eq_ignore_ascii_case(name)
                || region.display_name().eq_ignore_ascii_case(name)
        })
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Resolved endpoints for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Full token URL (`.../api/login/generatetoken`)
    pub auth_url: String,
    /// Versioned API base (`.../api/v1`)
    pub api_base: String,
}

impl Endpoints {
    pub fn for_region(region: Region) -> Self {
        Self::from_hosts(region.auth_host(), region.api_host())
    }

    /// Build endpoints from bare hosts, e.g. a staging or local server
    pub fn from_hosts(auth_host: &str, api_host: &str) -> Self {
        Self {
            auth_url: format!("{}{}", auth_host.trim_end_matches('/'), AUTH_TOKEN_PATH),
            api_base: format!("{}{}", api_host.trim_end_matches('/'), API_VERSION_PATH),
        }
    }

    /// Region endpoints with optional host overrides applied
    pub fn resolve(region: Region, auth_host: Option<&str>, api_host: Option<&str>) -> Self {
        Self::from_hosts(
            auth_host.unwrap_or(region.auth_host()),
            api_host.unwrap_or(region.api_host()),
        )
    }

    /// Collection URL for a resource kind
    pub fn resource_url(&self, kind: ResourceKind) -> String {
        format!("{}/{}", self.api_base, kind.endpoint_path())
    }
}

/// The three resource types the uploader can create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Users,
    Projects,
    EmployerProfiles,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Users,
        ResourceKind::Projects,
        ResourceKind::EmployerProfiles,
    ];

    /// Collection path under `/api/v1`
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            ResourceKind::Users => resources::WORKER_PROFILES,
            ResourceKind::Projects => resources::PROJECTS,
            ResourceKind::EmployerProfiles => resources::EMPLOYER_PROFILES,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::Users => "Users",
            ResourceKind::Projects => "Projects",
            ResourceKind::EmployerProfiles => "Employer Profiles",
        }
    }

    /// Singular noun used in log lines ("Sending user ...")
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Users => "user",
            ResourceKind::Projects => "project",
            ResourceKind::EmployerProfiles => "employer profile",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Login details for a single run. Never written to disk.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub tenant: String,
    pub region: Region,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("tenant", &self.tenant)
            .field("region", &self.region)
            .finish()
    }
}

/// Bearer token returned by the auth endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token(<redacted>)")
    }
}
