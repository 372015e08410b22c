use std::path::Path;

use calamine::{DataType, Reader, open_workbook_auto};

use crate::error::{Result, ToolError};
use crate::model::RawSheet;

/// Reads the first worksheet of a workbook into a raw cell matrix.
///
/// Cell values are folded to plain text at this boundary: numbers render
/// without formatting, booleans as `true`/`false`, and empty cells become
/// the empty string. The inference engine downstream only ever sees text.
pub fn read_sheet(path: &Path) -> Result<RawSheet> {
    let mut workbook = open_workbook_auto(path)?;

    let range_result = workbook.worksheet_range_at(0).ok_or_else(|| {
        ToolError::InvalidWorkbook(format!("no worksheet in {}", path.display()))
    })?;
    let range = range_result.map_err(ToolError::from)?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    Ok(RawSheet::new(rows))
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
