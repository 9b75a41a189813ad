//! Types shared by the reader, the mapper and the runner

mod cell;
mod payload;
mod schema;

pub use cell::{Cell, Row};
pub use payload::{Address, EmployerProfilePayload, Payload, ProjectPayload, SiteTiming, UserPayload};
pub use schema::{ColumnSpec, ResourceSchema, SkipRule};
