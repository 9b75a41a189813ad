//! Read upload rows from an Excel workbook
//!
//! Rows are numbered the way Excel shows them (1-based), regardless of where
//! the sheet's used range starts.

use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx, open_workbook};
use log::debug;

use crate::upload::types::{Cell, Row};

/// Why a workbook could not be loaded. Always fatal for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkbookError {
    /// File missing, not an xlsx/xlsm, or corrupt
    Open { path: PathBuf, message: String },
    /// The requested sheet does not exist
    SheetNotFound { sheet: String, available: Vec<String> },
    /// The sheet exists but its cells could not be read
    Read { sheet: String, message: String },
}

impl std::fmt::Display for WorkbookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkbookError::Open { path, message } => {
                write!(f, "failed to open workbook {}: {}", path.display(), message)
            }
            WorkbookError::SheetNotFound { sheet, available } => write!(
                f,
                "sheet '{}' not found in workbook. Available sheets: [{}]",
                sheet,
                available.join(", ")
            ),
            WorkbookError::Read { sheet, message } => {
                write!(f, "failed to read sheet '{}': {}", sheet, message)
            }
        }
    }
}

impl std::error::Error for WorkbookError {}

/// Rows of one sheet, starting at the requested row
#[derive(Debug, Clone)]
pub struct SheetRows {
    pub sheet_name: String,
    /// Rows at or after the start row, in file order
    pub rows: Vec<Row>,
    /// Last used row number in the sheet (for progress)
    pub total_rows: usize,
}

/// Read `sheet_name` from the workbook, keeping rows numbered `start_row` and up
pub fn read_sheet_rows<P: AsRef<Path>>(
    path: P,
    sheet_name: &str,
    start_row: usize,
) -> Result<SheetRows, WorkbookError> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| WorkbookError::Open {
        path: path.to_path_buf(),
        message: format!("{}", e),
    })?;

    let available: Vec<String> = workbook.sheet_names().to_vec();
    if !available.iter().any(|name| name == sheet_name) {
        return Err(WorkbookError::SheetNotFound {
            sheet: sheet_name.to_string(),
            available,
        });
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| WorkbookError::Read {
            sheet: sheet_name.to_string(),
            message: format!("{}", e),
        })?;

    // The used range may not start at A1
    let (first_row, first_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows = Vec::new();
    let mut total_rows = 0;

    for (offset, data_row) in range.rows().enumerate() {
        let number = first_row + offset + 1;
        total_rows = number;

        if number < start_row {
            continue;
        }

        let mut cells = vec![Cell::Empty; first_col];
        cells.extend(data_row.iter().map(cell_from_data));
        rows.push(Row::new(number, cells));
    }

    debug!(
        "Read {} rows from sheet '{}' (last row {})",
        rows.len(),
        sheet_name,
        total_rows
    );

    Ok(SheetRows {
        sheet_name: sheet_name.to_string(),
        rows,
        total_rows,
    })
}

/// Convert a calamine cell to a Cell
fn cell_from_data(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::String(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::DateTime(format!("{}", dt)),
        Data::DateTimeIso(s) => Cell::DateTime(s.clone()),
        Data::DurationIso(s) => Cell::String(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}
