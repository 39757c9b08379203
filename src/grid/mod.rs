//! Spreadsheet mode: a fixed-size grid of string cells
//!
//! The grid starts at 100 rows by 26 columns (A..Z) and only grows through
//! [`SpreadsheetGrid::add_row`] / [`SpreadsheetGrid::add_column`]. Cells hold
//! plain strings; there are no formulas.

pub mod cell;
pub mod export;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

pub use cell::{column_to_letters, letters_to_column, CellPosition};
pub use export::{export, export_csv, import_csv, write_csv, ExportOutcome};

use crate::error::EditorError;

pub const DEFAULT_ROWS: usize = 100;
pub const DEFAULT_COLS: usize = 26;

#[derive(Debug, Clone)]
pub struct SpreadsheetGrid {
    rows: usize,
    cols: usize,
    /// Non-empty cells only
    cells: BTreeMap<CellPosition, String>,
    /// Cell with keyboard focus
    active: CellPosition,
}

impl Default for SpreadsheetGrid {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl SpreadsheetGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
            cells: BTreeMap::new(),
            active: CellPosition::default(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn add_row(&mut self) -> usize {
        self.rows += 1;
        self.rows
    }

    pub fn add_column(&mut self) -> usize {
        self.cols += 1;
        self.cols
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Cell content; empty string for unset cells
    pub fn get(&self, pos: CellPosition) -> &str {
        self.cells.get(&pos).map(String::as_str).unwrap_or("")
    }

    /// Look up a cell by id (`"B3"`)
    pub fn get_by_id(&self, id: &str) -> Result<&str, EditorError> {
        let pos: CellPosition = id.parse()?;
        if !self.contains(pos) {
            return Err(EditorError::InvalidCell(id.to_string()));
        }
        Ok(self.get(pos))
    }

    /// Set a cell; an empty value clears it
    pub fn set(&mut self, pos: CellPosition, value: impl Into<String>) -> Result<(), EditorError> {
        if !self.contains(pos) {
            return Err(EditorError::InvalidCell(pos.to_string()));
        }
        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, value);
        }
        Ok(())
    }

    pub fn set_by_id(&mut self, id: &str, value: impl Into<String>) -> Result<(), EditorError> {
        let pos: CellPosition = id.parse()?;
        self.set(pos, value)
    }

    pub fn clear(&mut self, pos: CellPosition) {
        self.cells.remove(&pos);
    }

    /// Empty every cell; dimensions are kept
    pub fn clear_all(&mut self) {
        if !self.cells.is_empty() {
            tracing::debug!("Clearing {} spreadsheet cells", self.cells.len());
        }
        self.cells.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.len()
    }

    /// Non-empty cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellPosition, &str)> {
        self.cells.iter().map(|(pos, v)| (*pos, v.as_str()))
    }

    /// Every column of one row
    pub fn row_values(&self, row: usize) -> Vec<String> {
        (0..self.cols)
            .map(|col| self.get(CellPosition::new(row, col)).to_string())
            .collect()
    }

    // === Navigation ===

    pub fn active(&self) -> CellPosition {
        self.active
    }

    /// Focus a cell, clamping to the grid
    pub fn move_to(&mut self, row: usize, col: usize) -> CellPosition {
        self.active = CellPosition::new(row.min(self.rows - 1), col.min(self.cols - 1));
        self.active
    }

    /// Move focus relative to the active cell (arrow keys, Tab, Return)
    pub fn move_by(&mut self, d_row: isize, d_col: isize) -> CellPosition {
        let row = self.active.row.saturating_add_signed(d_row);
        let col = self.active.col.saturating_add_signed(d_col);
        self.move_to(row, col)
    }

    // === Clipboard ===

    /// Paste clipboard text at `at`.
    ///
    /// Text containing a tab or newline is treated as a table: the whole
    /// text is trimmed, split into rows on `\n`, and each row split on tabs
    /// or runs of two or more whitespace characters. Cells are trimmed;
    /// anything past the grid edge is dropped. Other text goes into `at`
    /// unchanged. Returns the number of cells written.
    pub fn paste_block(&mut self, at: CellPosition, text: &str) -> Result<usize, EditorError> {
        if !self.contains(at) {
            return Err(EditorError::InvalidCell(at.to_string()));
        }
        if !text.contains(['\t', '\n']) {
            self.set(at, text)?;
            return Ok(1);
        }

        let mut written = 0;
        for (r, row) in text.trim().split('\n').enumerate() {
            for (c, value) in split_cells(row).into_iter().enumerate() {
                let target = CellPosition::new(at.row + r, at.col + c);
                if self.contains(target) {
                    self.set(target, value.trim())?;
                    written += 1;
                }
            }
        }
        tracing::debug!("Pasted {} cells at {}", written, at);
        Ok(written)
    }
}

/// Split a pasted row on a tab or on a run of 2+ whitespace characters
fn split_cells(row: &str) -> Vec<&str> {
    static SEPARATOR: OnceLock<Option<Regex>> = OnceLock::new();
    let separator = SEPARATOR.get_or_init(|| match Regex::new(r"\t|\s{2,}") {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Cell separator pattern failed to compile: {}", e);
            None
        }
    });
    match separator {
        Some(re) => re.split(row).collect(),
        None => vec![row],
    }
}
