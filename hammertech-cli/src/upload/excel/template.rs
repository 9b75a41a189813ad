//! Blank upload templates

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::upload::types::ResourceSchema;

/// Write a workbook with a single header row laid out for `schema`
pub fn write_template(schema: &ResourceSchema, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(schema.sheet_name)?;

    let header = Format::new().set_bold();

    for (col, column) in schema.columns.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, column.title, &header)?;
        worksheet.set_column_width(col, (column.title.len() + 6) as f64)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to save template: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ResourceKind;
    use crate::upload::excel::read_sheet_rows;
    use crate::upload::mapping::schema_for;

    #[test]
    fn test_template_header_matches_schema() {
        for kind in ResourceKind::ALL {
            let schema = schema_for(kind);
            let path = std::env::temp_dir()
                .join(format!("template-{}-{}", uuid::Uuid::new_v4(), schema.template_file));

            write_template(schema, &path).unwrap();
            let sheet = read_sheet_rows(&path, schema.sheet_name, 1).unwrap();
            let data = read_sheet_rows(&path, schema.sheet_name, 2).unwrap();
            std::fs::remove_file(&path).ok();

            assert_eq!(sheet.rows.len(), 1);
            let titles: Vec<String> = sheet.rows[0]
                .cells
                .iter()
                .map(|c| c.text_or_empty())
                .collect();
            let expected: Vec<String> =
                schema.columns.iter().map(|c| c.title.to_string()).collect();
            assert_eq!(titles, expected);

            // Header only, so an upload from row 2 has nothing to send
            assert!(data.rows.is_empty());
        }
    }
}
