//! Table types.

use serde::{Deserialize, Serialize};

/// A table read from the document body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from a grid of cell text.
    pub fn from_grid<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(TableRow::from_strings).collect(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether every row has the same number of cells as the first.
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|r| r.cells.len() == width)
    }

    /// The table as a grid of cell text.
    pub fn grid(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(|c| c.text.clone()).collect())
            .collect()
    }
}

/// A table row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }
}

/// A table cell. Paragraphs inside the cell are joined with `\n`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text
    pub text: String,
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
        assert!(table.is_rectangular());
    }

    #[test]
    fn test_table_from_grid() {
        let table = Table::from_grid([vec!["A", "B", "C"], vec!["1", "2", "3"]]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert!(table.is_rectangular());
        assert_eq!(table.grid()[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_irregular_table() {
        let mut table = Table::from_grid([vec!["A", "B"]]);
        table.add_row(TableRow::from_strings(["only"]));
        assert!(!table.is_rectangular());
    }

    #[test]
    fn test_cell_text() {
        assert!(!TableCell::text("Hello").is_empty());
        assert!(TableCell::text("  ").is_empty());
        assert!(TableCell::empty().is_empty());
    }
}
