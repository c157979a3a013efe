//! Pipe-table serialization.

use super::result::Warning;

/// Converts a grid of cell text into a Markdown pipe table.
///
/// Irregular grids are normalized to the first row's width, which is lossy:
/// short rows are padded with empty cells and cells beyond that width are
/// dropped. Every adjusted row yields a [`Warning::IrregularTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TableSerializer;

impl TableSerializer {
    /// Create a serializer.
    pub fn new() -> Self {
        Self
    }

    /// Make the grid rectangular. `table_index` only labels warnings.
    pub fn normalize(
        &self,
        rows: &[Vec<String>],
        table_index: usize,
    ) -> (Vec<Vec<String>>, Vec<Warning>) {
        let mut warnings = Vec::new();
        let Some(width) = rows.first().map(Vec::len) else {
            return (Vec::new(), warnings);
        };

        let grid = rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                let mut cells: Vec<String> = row.iter().map(|c| clean_cell(c)).collect();
                if cells.len() != width {
                    let warning = Warning::IrregularTable {
                        table_index,
                        expected_columns: width,
                        row_index,
                        found_columns: cells.len(),
                    };
                    log::warn!("{}", warning);
                    warnings.push(warning);
                    cells.resize(width, String::new());
                }
                cells
            })
            .collect();

        (grid, warnings)
    }

    /// Render a rectangular grid. The first row is the header.
    pub fn render(&self, rows: &[Vec<String>]) -> String {
        let Some(header) = rows.first() else {
            return String::new();
        };
        if header.is_empty() {
            return String::new();
        }

        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(render_row(header));
        lines.push(format!("|{}", " --- |".repeat(header.len())));
        for row in &rows[1..] {
            lines.push(render_row(row));
        }
        lines.join("\n")
    }
}

fn render_row(cells: &[String]) -> String {
    let mut line = String::from("|");
    for cell in cells {
        if cell.is_empty() {
            line.push_str("  |");
        } else {
            line.push(' ');
            line.push_str(cell);
            line.push_str(" |");
        }
    }
    line
}

/// Trim, collapse internal line breaks to one space, escape pipes.
fn clean_cell(text: &str) -> String {
    text.split(|c: char| c == '\n' || c == '\r')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}
