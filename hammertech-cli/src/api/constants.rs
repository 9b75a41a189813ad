//! HammerTech API constants

/// Path of the token endpoint on every regional auth host
pub const AUTH_TOKEN_PATH: &str = "/api/login/generatetoken";

/// Versioned API prefix appended to every regional API host
pub const API_VERSION_PATH: &str = "/api/v1";

/// Role assigned to every user created by the uploader
pub const DEFAULT_ROLE_NAME: &str = "safetymanager";

/// Regional hosts
pub mod hosts {
    pub const NORTH_AMERICA_AUTH: &str = "https://us-auth.hammertechonline.com";
    pub const NORTH_AMERICA_API: &str = "https://us-api.hammertechonline.com";
    pub const ASIA_AUSTRALIA_NZ_AUTH: &str = "https://au-auth.hammertechonline.com";
    pub const ASIA_AUSTRALIA_NZ_API: &str = "https://au-api.hammertechonline.com";
    pub const EUROPE_UK_AUTH: &str = "https://eu-auth.hammertechonline.com";
    pub const EUROPE_UK_API: &str = "https://eu-api.hammertechonline.com";
}

/// Resource collection paths under the versioned API prefix
pub mod resources {
    pub const WORKER_PROFILES: &str = "workerprofiles";
    pub const PROJECTS: &str = "projects";
    pub const EMPLOYER_PROFILES: &str = "EmployerProfiles";
}
