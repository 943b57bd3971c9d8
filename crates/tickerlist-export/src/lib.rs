//! # Tickerlist Export
//!
//! Spreadsheet output for tickerlist: records become a [`Table`] whose
//! columns are the record field names, and the table is written to a named
//! worksheet of an `.xlsx` file.
//!
//! ## Append semantics
//!
//! When the target file already exists, its first worksheet is read back,
//! the new rows are concatenated below it (columns aligned by name), and the
//! whole workbook is rewritten. The rewrite is not atomic: a crash while
//! saving can leave a truncated file behind.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serde::Serialize;
//! use tickerlist_export::export_records;
//!
//! #[derive(Serialize)]
//! struct Row {
//!     name: String,
//!     symbol: String,
//! }
//!
//! fn main() -> Result<(), tickerlist_export::ExportError> {
//!     let rows = vec![Row { name: "Apple Inc.".into(), symbol: "AAPL".into() }];
//!     let report = export_records("list_0.xlsx", "list 0", &rows)?;
//!     println!("{} rows now in {}", report.total_rows, report.path.display());
//!     Ok(())
//! }
//! ```

pub mod table;
pub mod xlsx;

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

pub use table::{CellValue, Table};
pub use xlsx::{read_table, write_table};

/// Errors that can occur while reading or writing spreadsheets.
#[derive(Debug, Error)]
pub enum ExportError {
    /// I/O error (file system operations).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The workbook could not be written.
    #[error("xlsx write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// The existing workbook could not be read.
    #[error("xlsx read error: {0}")]
    Read(#[from] calamine::XlsxError),

    #[error("workbook {} has no worksheet", path.display())]
    MissingSheet { path: PathBuf },

    /// A record did not serialize to a JSON object.
    #[error("record {index} does not serialize to named fields")]
    Record { index: usize },

    #[error("table of {rows} rows x {columns} columns exceeds worksheet limits")]
    TooLarge { rows: usize, columns: usize },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// Outcome of one export call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub sheet: String,
    /// Data rows found in the file before this export.
    pub existing_rows: usize,
    pub appended_rows: usize,
    pub total_rows: usize,
}

/// Writes `records` to `sheet` of the workbook at `path`, appending below
/// the rows of an existing workbook.
pub fn export_records<T: Serialize>(
    path: impl AsRef<Path>,
    sheet: &str,
    records: &[T],
) -> Result<ExportReport, ExportError> {
    export_table(path, sheet, Table::from_records(records)?)
}

/// [`export_records`] for a table that is already built.
pub fn export_table(
    path: impl AsRef<Path>,
    sheet: &str,
    table: Table,
) -> Result<ExportReport, ExportError> {
    let path = path.as_ref();
    let appended_rows = table.row_count();

    let (existing_rows, merged) = if path.exists() {
        let existing = read_table(path)?;
        (existing.row_count(), existing.concat(table))
    } else {
        (0, table)
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    write_table(path, sheet, &merged)?;

    tracing::info!(
        path = %path.display(),
        sheet,
        existing_rows,
        appended_rows,
        "exported rows"
    );

    Ok(ExportReport {
        path: path.to_path_buf(),
        sheet: sheet.to_owned(),
        existing_rows,
        appended_rows,
        total_rows: merged.row_count(),
    })
}
