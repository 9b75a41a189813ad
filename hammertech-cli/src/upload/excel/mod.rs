//! Excel input and blank templates

pub mod reader;
pub mod template;

pub use reader::{SheetRows, WorkbookError, read_sheet_rows};
pub use template::write_template;
