//! Row to payload mapping
//!
//! Each resource kind has a fixed column order, a skip rule and a mapper,
//! collected in one schema table shared by the runner, the templates and
//! the `columns` command.

use crate::api::ResourceKind;
use crate::api::constants::DEFAULT_ROLE_NAME;

use super::types::{
    Address, ColumnSpec, EmployerProfilePayload, Payload, ProjectPayload, ResourceSchema, Row,
    SiteTiming, SkipRule, UserPayload,
};

/// Column indices for user rows
mod user_cols {
    pub const EMAIL: usize = 0;
    pub const FULL_NAME: usize = 1;
    pub const PHONE: usize = 2;
    pub const JOB_TITLE: usize = 3;
    pub const INTERNAL_IDENTIFIER: usize = 4;
    pub const PROJECT_ID: usize = 5;
}

/// Column indices for project rows
mod project_cols {
    pub const NAME: usize = 0;
    pub const COUNTRY: usize = 1;
    pub const SITE_ADDRESS: usize = 2;
    pub const TIME_ZONE: usize = 3;
    pub const STATE: usize = 4;
    pub const INTERNAL_ID: usize = 5;
    pub const REGION_ID: usize = 6;
}

/// Column indices for employer profile rows
mod employer_cols {
    pub const BUSINESS_NAME: usize = 0;
    pub const ABN: usize = 1;
    pub const STREET_ADDRESS: usize = 2;
    pub const CITY: usize = 3;
    pub const STATE: usize = 4;
    pub const POSTAL_CODE: usize = 5;
    pub const COUNTRY: usize = 6;
    pub const INTERNAL_IDENTIFIER: usize = 7;
}

const USER_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::required("Email"),
    ColumnSpec::required("Full Name"),
    ColumnSpec::required("Phone"),
    ColumnSpec::required("Job Title"),
    ColumnSpec::required("Internal Identifier"),
    ColumnSpec::required("Demo Project ID"),
];

const PROJECT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::required("ProjectName"),
    ColumnSpec::required("Country"),
    ColumnSpec::required("siteAddress"),
    ColumnSpec::required("timeZoneString"),
    ColumnSpec::required("state"),
    ColumnSpec::required("internalid"),
    ColumnSpec::required("regionId"),
];

const EMPLOYER_PROFILE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::required("Business Name"),
    ColumnSpec::required("ABN"),
    ColumnSpec::required("Street Address"),
    ColumnSpec::required("City / Suburb"),
    ColumnSpec::required("State / Province"),
    ColumnSpec::required("Postal Code"),
    ColumnSpec::required("Country"),
    ColumnSpec::optional("Internal Identifier"),
];

static USERS: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Users,
    columns: USER_COLUMNS,
    skip_rule: SkipRule::BlankColumn(user_cols::EMAIL),
    sheet_name: "Users",
    template_file: "userUploadTemplate.xlsx",
    mapper: map_user,
};

static PROJECTS: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Projects,
    columns: PROJECT_COLUMNS,
    skip_rule: SkipRule::AllBlank,
    sheet_name: "Projects",
    template_file: "projectUploadTemplate.xlsx",
    mapper: map_project,
};

static EMPLOYER_PROFILES: ResourceSchema = ResourceSchema {
    kind: ResourceKind::EmployerProfiles,
    columns: EMPLOYER_PROFILE_COLUMNS,
    skip_rule: SkipRule::AllBlank,
    sheet_name: "Employer Profiles",
    template_file: "employerProfileUploadTemplate.xlsx",
    mapper: map_employer_profile,
};

/// Schema for a resource kind
pub fn schema_for(kind: ResourceKind) -> &'static ResourceSchema {
    match kind {
        ResourceKind::Users => &USERS,
        ResourceKind::Projects => &PROJECTS,
        ResourceKind::EmployerProfiles => &EMPLOYER_PROFILES,
    }
}

/// Outcome of mapping one row
#[derive(Debug, Clone, PartialEq)]
pub enum RowMapping {
    Payload(Payload),
    /// Blank row, not uploaded and not counted
    Skip,
}

/// Map a row to the payload for `kind`. Pure: no I/O, same row gives the same payload.
pub fn map_row(row: &Row, kind: ResourceKind) -> RowMapping {
    let schema = schema_for(kind);
    if schema.should_skip(row) {
        RowMapping::Skip
    } else {
        RowMapping::Payload((schema.mapper)(row))
    }
}

fn map_user(row: &Row) -> Payload {
    use user_cols::*;

    let project_id = row.cell(PROJECT_ID);
    let user_project_ids = if project_id.is_blank() {
        Vec::new()
    } else {
        vec![project_id.to_json()]
    };

    Payload::User(UserPayload {
        name: row.cell(FULL_NAME).text_or_empty(),
        title: row.cell(JOB_TITLE).text_or_empty(),
        mobile: row.cell(PHONE).text_or_empty(),
        email: row.cell(EMAIL).text_or_empty(),
        internal_identifier: row.cell(INTERNAL_IDENTIFIER).text_or_empty(),
        role_names: vec![DEFAULT_ROLE_NAME.to_string()],
        user_project_ids,
    })
}

fn map_project(row: &Row) -> Payload {
    use project_cols::*;

    Payload::Project(ProjectPayload {
        is_archived: false,
        name: row.cell(NAME).to_json(),
        site_address: row.cell(SITE_ADDRESS).to_json(),
        region_id: row.cell(REGION_ID).to_json(),
        state: row.cell(STATE).to_json(),
        time_zone_string: row.cell(TIME_ZONE).to_json(),
        country: row.cell(COUNTRY).to_json(),
        internal_identifier: row.cell(INTERNAL_ID).to_json(),
        site_timing: default_site_timing(),
    })
}

fn map_employer_profile(row: &Row) -> Payload {
    use employer_cols::*;

    Payload::EmployerProfile(EmployerProfilePayload {
        business_name: row.cell(BUSINESS_NAME).text_or_empty(),
        abn: row.cell(ABN).text_or_empty(),
        addresses: vec![Address {
            address_type: "Physical".to_string(),
            street_address: row.cell(STREET_ADDRESS).text_or_empty(),
            suburb: row.cell(CITY).text_or_empty(),
            state: row.cell(STATE).text_or_empty(),
            post_code: row.cell(POSTAL_CODE).text_or_empty(),
            country: row.cell(COUNTRY).text_or_empty(),
        }],
        internal_identifier: row.cell(INTERNAL_IDENTIFIER).text_or_empty(),
    })
}

/// Site hours attached to every new project
pub const SITE_DAYS: [&str; 7] = [
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
    "Monday",
    "Tuesday",
];
pub const SITE_START_TIME: &str = "07:00:00";
pub const SITE_END_TIME: &str = "17:00:00";

fn default_site_timing() -> Vec<SiteTiming> {
    SITE_DAYS
        .iter()
        .map(|day| SiteTiming {
            day_of_week: day.to_string(),
            start_time: SITE_START_TIME.to_string(),
            end_time: SITE_END_TIME.to_string(),
        })
        .collect()
}
