//! Spreadsheet-to-API upload
//!
//! Reads rows from an Excel sheet, maps each to a HammerTech payload and
//! sends them one at a time.

pub mod excel;
pub mod mapping;
pub mod runner;
pub mod types;

pub use excel::{WorkbookError, read_sheet_rows, write_template};
pub use mapping::{RowMapping, map_row, schema_for};
pub use runner::{
    DEFAULT_START_ROW, NoopObserver, Progress, RowOutcome, RowStatus, RunError, RunMode,
    RunObserver, RunPhase, RunResult, UploadRequest, UploadRunner,
};
pub use types::{Cell, Payload, ResourceSchema, Row};
