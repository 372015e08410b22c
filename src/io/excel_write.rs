use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::error::Result;
use crate::query::TableView;

/// Sheet holding the consolidated catalog in an exported workbook.
pub const CATALOG_SHEET: &str = "Inventario";
/// Sheet holding the batch warnings, written only when there are any.
pub const WARNINGS_SHEET: &str = "Avisos";

/// Writes each (sheet name, table) pair to a workbook at `path`.
///
/// Every sheet gets an autofiltered Excel table over its data, so the
/// exported catalog stays filterable inside a spreadsheet UI.
pub fn write_tables(path: &Path, sheets: &[(String, TableView)]) -> Result<()> {
    let mut workbook = Workbook::new();

    for (name, table) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name)?;

        for (col_idx, header) in table.columns.iter().enumerate() {
            worksheet.write_string(0, col_idx as u16, header)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                worksheet.write_string((row_idx + 1) as u32, col_idx as u16, cell)?;
            }
        }

        let mut excel_table = rust_xlsxwriter::Table::new();
        excel_table.set_autofilter(true);
        let col_end = (table.columns.len() as u16).saturating_sub(1);
        let row_end = if table.rows.is_empty() {
            0
        } else {
            table.rows.len() as u32
        };
        worksheet.add_table(0, 0, row_end, col_end, &excel_table)?;
        worksheet.autofit();
    }

    workbook.save(path)?;
    Ok(())
}
