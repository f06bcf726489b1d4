use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::basis::directory::error::Result;
use crate::basis::directory::flatten::SheetTable;

/// Writes the sheet to the given path, replacing any existing file.
pub fn write_sheet(path: &Path, table: &SheetTable) -> Result<()> {
    let mut workbook_writer = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook_writer.add_worksheet();
    worksheet.set_name(&table.sheet_name)?;

    for (col_idx, column) in table.columns.iter().enumerate() {
        let col = col_idx as u16;
        worksheet.write_string_with_format(0, col, column.header, &header_format)?;
        worksheet.set_column_width(col, column.width)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            // Excel has no empty string cell; leave the cell blank.
            if cell.is_empty() {
                continue;
            }
            worksheet.write_string((row_idx + 1) as u32, col_idx as u16, cell)?;
        }
    }

    let col_end = (table.columns.len() as u16).saturating_sub(1);
    worksheet.autofilter(0, 0, table.rows.len() as u32, col_end)?;
    worksheet.set_freeze_panes(1, 0)?;

    workbook_writer.save(path)?;
    Ok(())
}
