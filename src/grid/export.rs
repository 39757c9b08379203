//! Spreadsheet export (CSV always, XLSX with the `xlsx` feature)
//!
//! The format is picked from the target extension. Requests the build can't
//! satisfy are written as CSV next to the requested path instead.

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use super::{CellPosition, SpreadsheetGrid};
use crate::error::EditorError;

/// What an export actually wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Csv(PathBuf),
    Xlsx(PathBuf),
    /// XLSX was requested but this build has no writer for it
    FellBackToCsv { requested: PathBuf, written: PathBuf },
}

impl ExportOutcome {
    pub fn written_path(&self) -> &Path {
        match self {
            ExportOutcome::Csv(p) | ExportOutcome::Xlsx(p) => p,
            ExportOutcome::FellBackToCsv { written, .. } => written,
        }
    }

    /// Warning to surface to the user, if any
    pub fn warning(&self) -> Option<String> {
        match self {
            ExportOutcome::FellBackToCsv { written, .. } => Some(format!(
                "Excel format is not available in this build. Saved as CSV instead: {}",
                written.display()
            )),
            _ => None,
        }
    }
}

/// Export the grid to `path`, choosing the format from its extension.
///
/// `.csv` writes CSV; `.xlsx` writes a workbook when built with the `xlsx`
/// feature and falls back to CSV otherwise; anything else is written as CSV
/// with the extension replaced.
pub fn export(grid: &SpreadsheetGrid, path: &Path) -> Result<ExportOutcome, EditorError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => {
            export_csv(grid, path)?;
            Ok(ExportOutcome::Csv(path.to_path_buf()))
        }
        "xlsx" => export_xlsx_or_fallback(grid, path),
        _ => {
            let written = path.with_extension("csv");
            tracing::info!(
                "Unsupported spreadsheet extension {:?}, writing {}",
                ext,
                written.display()
            );
            export_csv(grid, &written)?;
            Ok(ExportOutcome::Csv(written))
        }
    }
}

/// Write every row that has a non-blank cell, each spanning all columns.
/// Returns the number of records written.
pub fn write_csv<W: Write>(grid: &SpreadsheetGrid, writer: W) -> Result<usize, EditorError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    let mut written = 0;
    for row in 0..grid.rows() {
        let values = grid.row_values(row);
        if values.iter().any(|v| !v.trim().is_empty()) {
            csv_writer.write_record(&values)?;
            written += 1;
        }
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(written)
}

pub fn export_csv(grid: &SpreadsheetGrid, path: &Path) -> Result<usize, EditorError> {
    let file = File::create(path).map_err(|source| EditorError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let written = write_csv(grid, file)?;
    tracing::info!("Exported {} rows to {}", written, path.display());
    Ok(written)
}

/// Fill a grid from CSV text, starting at A1. Rows and columns beyond the
/// grid are dropped. Returns the number of cells set.
pub fn import_csv(grid: &mut SpreadsheetGrid, content: &str) -> Result<usize, EditorError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(content.as_bytes()));

    grid.clear_all();
    let mut count = 0;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        for (col, value) in record.iter().enumerate() {
            let pos = CellPosition::new(row, col);
            if grid.contains(pos) && !value.is_empty() {
                grid.set(pos, value)?;
                count += 1;
            }
        }
    }
    Ok(count)
}

#[cfg(feature = "xlsx")]
fn export_xlsx_or_fallback(
    grid: &SpreadsheetGrid,
    path: &Path,
) -> Result<ExportOutcome, EditorError> {
    export_xlsx(grid, path)?;
    Ok(ExportOutcome::Xlsx(path.to_path_buf()))
}

#[cfg(not(feature = "xlsx"))]
fn export_xlsx_or_fallback(
    grid: &SpreadsheetGrid,
    path: &Path,
) -> Result<ExportOutcome, EditorError> {
    let written = path.with_extension("csv");
    tracing::warn!(
        "Built without xlsx support, writing {} instead of {}",
        written.display(),
        path.display()
    );
    export_csv(grid, &written)?;
    Ok(ExportOutcome::FellBackToCsv {
        requested: path.to_path_buf(),
        written,
    })
}

/// Header row of column letters, then data from row 2; empty cells skipped
#[cfg(feature = "xlsx")]
fn export_xlsx(grid: &SpreadsheetGrid, path: &Path) -> Result<(), EditorError> {
    use rust_xlsxwriter::Workbook;

    let xlsx_err = |e: rust_xlsxwriter::XlsxError| EditorError::Xlsx(e.to_string());

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet1").map_err(xlsx_err)?;

    for col in 0..grid.cols() {
        sheet
            .write_string(0, col as u16, super::column_to_letters(col))
            .map_err(xlsx_err)?;
    }
    for (pos, value) in grid.iter() {
        if value.trim().is_empty() {
            continue;
        }
        sheet
            .write_string(pos.row as u32 + 1, pos.col as u16, value)
            .map_err(xlsx_err)?;
    }

    workbook.save(path).map_err(xlsx_err)?;
    tracing::info!("Exported {} cells to {}", grid.filled_count(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SpreadsheetGrid {
        let mut grid = SpreadsheetGrid::new(5, 3);
        grid.set_by_id("A1", "name").unwrap();
        grid.set_by_id("C1", "qty").unwrap();
        grid.set_by_id("B3", "has,comma").unwrap();
        grid.set_by_id("A4", "   ").unwrap();
        grid
    }

    #[test]
    fn test_write_csv_skips_blank_rows() {
        let mut out = Vec::new();
        let written = write_csv(&sample(), &mut out).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "name,,qty\n,\"has,comma\",\n");
    }

    #[test]
    fn test_import_csv() {
        let mut grid = SpreadsheetGrid::new(2, 2);
        grid.set_by_id("B2", "stale").unwrap();
        let count = import_csv(&mut grid, "a,b,c\n,d\nx,y\n").unwrap();
        assert_eq!(count, 3);
        assert_eq!(grid.get_by_id("A1").unwrap(), "a");
        assert_eq!(grid.get_by_id("B2").unwrap(), "d");
    }

    #[test]
    fn test_fallback_warning() {
        let outcome = ExportOutcome::FellBackToCsv {
            requested: PathBuf::from("a.xlsx"),
            written: PathBuf::from("a.csv"),
        };
        assert_eq!(outcome.written_path(), Path::new("a.csv"));
        assert!(outcome.warning().is_some());
        assert!(ExportOutcome::Csv(PathBuf::from("a.csv")).warning().is_none());
    }
}
