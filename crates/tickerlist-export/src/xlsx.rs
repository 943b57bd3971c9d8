//! `.xlsx` reading (calamine) and writing (rust_xlsxwriter) for [`Table`].

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};

use crate::table::{CellValue, Table};
use crate::ExportError;

/// Row limit of an Excel worksheet, header row included.
pub const MAX_SHEET_ROWS: usize = 1_048_576;
/// Column limit of an Excel worksheet.
pub const MAX_SHEET_COLUMNS: usize = 16_384;

/// Reads the first worksheet of `path`; its first row holds the column names.
pub fn read_table(path: &Path) -> Result<Table, ExportError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExportError::MissingSheet {
            path: path.to_path_buf(),
        })??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };

    let columns = header
        .iter()
        .enumerate()
        .map(|(index, cell)| match cell {
            Data::Empty => format!("Unnamed: {index}"),
            other => other.to_string(),
        })
        .collect();

    let mut table = Table::new(columns);
    for row in rows {
        table.push_row(row.iter().map(cell_from_data).collect());
    }
    Ok(table)
}

/// Writes `table` as the only worksheet of a new workbook at `path`,
/// replacing any existing file.
pub fn write_table(path: &Path, sheet: &str, table: &Table) -> Result<(), ExportError> {
    let rows = table.row_count() + 1;
    let columns = table.columns().len();
    if rows > MAX_SHEET_ROWS || columns > MAX_SHEET_COLUMNS {
        return Err(ExportError::TooLarge { rows, columns });
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet)?;

    let header_format = Format::new().set_bold();
    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name.as_str(), &header_format)?;
    }

    for (index, cells) in table.rows().iter().enumerate() {
        let row = (index + 1) as u32;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(value) => {
                    worksheet.write_string(row, col, value.as_str())?;
                }
                CellValue::Number(value) => {
                    worksheet.write_number(row, col, *value)?;
                }
                CellValue::Bool(value) => {
                    worksheet.write_boolean(row, col, *value)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(value) => CellValue::Text(value.clone()),
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(value) => CellValue::Number(value.as_f64()),
        Data::DateTimeIso(value) | Data::DurationIso(value) => CellValue::Text(value.clone()),
        Data::Error(error) => CellValue::Text(format!("#{error:?}")),
    }
}
