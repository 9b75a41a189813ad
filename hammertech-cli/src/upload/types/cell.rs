//! Spreadsheet cell and row representation

use serde_json::{Value, json};

/// A raw cell value as read from the workbook
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Absent, empty string, or an error cell
    Empty,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Dates are kept as their textual form
    DateTime(String),
}

impl Cell {
    /// Absent or an empty string. Whitespace is a value.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Cell coerced to text. Whole floats lose their fraction so a phone
    /// number typed as a number comes back as `5551234567`, not `5551234567.0`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::String(s) => Some(s.clone()),
            Cell::Int(i) => Some(i.to_string()),
            Cell::Float(f) => Some(match whole_number(*f) {
                Some(i) => i.to_string(),
                None => f.to_string(),
            }),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::DateTime(s) => Some(s.clone()),
        }
    }

    /// Text form, or an empty string for an absent cell
    pub fn text_or_empty(&self) -> String {
        self.as_text().unwrap_or_default()
    }

    /// Cell as a JSON scalar with its type preserved
    pub fn to_json(&self) -> Value {
        match self {
            Cell::Empty => Value::Null,
            Cell::String(s) => Value::String(s.clone()),
            Cell::Int(i) => json!(*i),
            Cell::Float(f) => match whole_number(*f) {
                Some(i) => json!(i),
                None => json!(*f),
            },
            Cell::Bool(b) => Value::Bool(*b),
            Cell::DateTime(s) => Value::String(s.clone()),
        }
    }
}

fn whole_number(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

static EMPTY: Cell = Cell::Empty;

/// One worksheet row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-based row number in the sheet
    pub number: usize,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(number: usize, cells: Vec<Cell>) -> Self {
        Self { number, cells }
    }

    /// Cell at a 0-based column. Columns past the end read as empty.
    pub fn cell(&self, col: usize) -> &Cell {
        self.cells.get(col).unwrap_or(&EMPTY)
    }

    /// True when every column in `0..width` is blank
    pub fn is_blank(&self, width: usize) -> bool {
        (0..width).all(|col| self.cell(col).is_blank())
    }
}
