//! Cell addressing: column letters + 1-based row number (`A1`, `AA12`)

use std::fmt;
use std::str::FromStr;

use crate::error::EditorError;

/// Position of a cell in the grid (0-indexed)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_to_letters(self.col), self.row + 1)
    }
}

impl FromStr for CellPosition {
    type Err = EditorError;

    /// Parse a cell id such as `B7` (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EditorError::InvalidCell(s.to_string());
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (letters, digits) = s.split_at(split);
        let col = letters_to_column(letters).ok_or_else(invalid)?;
        let row: usize = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }
        Ok(Self { row: row - 1, col })
    }
}

/// Convert column index to Excel-style letters (0 -> A, 25 -> Z, 26 -> AA)
pub fn column_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col + 1;
    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}

/// Inverse of [`column_to_letters`]
pub fn letters_to_column(letters: &str) -> Option<usize> {
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let mut n = 0usize;
    for c in letters.chars() {
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        n = n.checked_mul(26)?.checked_add(digit)?;
    }
    Some(n - 1)
}
