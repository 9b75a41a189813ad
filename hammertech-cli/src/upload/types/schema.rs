//! Column layout of each upload type

use crate::api::ResourceKind;

use super::{Payload, Row};

/// One expected column in the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Header text used in templates and help output
    pub title: &'static str,
    /// Whether the column may be missing entirely from shorter rows
    pub optional: bool,
}

impl ColumnSpec {
    pub const fn required(title: &'static str) -> Self {
        Self {
            title,
            optional: false,
        }
    }

    pub const fn optional(title: &'static str) -> Self {
        Self {
            title,
            optional: true,
        }
    }
}

/// When a row is ignored instead of uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipRule {
    /// Skip when this 0-based column is blank
    BlankColumn(usize),
    /// Skip when every schema column is blank
    AllBlank,
}

/// Everything the runner needs to know about one resource kind
#[derive(Debug, Clone, Copy)]
pub struct ResourceSchema {
    pub kind: ResourceKind,
    pub columns: &'static [ColumnSpec],
    pub skip_rule: SkipRule,
    /// Default sheet name, also used as the template's sheet name
    pub sheet_name: &'static str,
    /// File name of the blank template
    pub template_file: &'static str,
    /// Builds the payload for a non-skipped row
    pub mapper: fn(&Row) -> Payload,
}

impl ResourceSchema {
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn should_skip(&self, row: &Row) -> bool {
        match self.skip_rule {
            SkipRule::BlankColumn(col) => row.cell(col).is_blank(),
            SkipRule::AllBlank => row.is_blank(self.width()),
        }
    }
}
