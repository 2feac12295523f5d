//! Table layout and rendering for fixed-row-height tables.
//!
//! Units are whatever the caller's [`TableCanvas`] uses; y grows downwards
//! from the table's top edge.
//!
//! # Example
//!
//! ```ignore
//! use invoice_oxide::writer::{Table, TableCell, TableRow, TableStyle};
//!
//! let table = Table::new(vec![80.0, 60.0, 30.0])
//!     .with_row(TableRow::header(vec![TableCell::text("Kuvaus"), TableCell::text("Jäsen")]))
//!     .with_row(TableRow::new(vec![TableCell::text("Jäsenmaksu"), TableCell::text("Matti")]));
//! let bottom = table.render(&mut canvas, 20.0, 100.0);
//! ```

use super::font_metrics::Font;

/// Drawing surface a table renders onto.
pub trait TableCanvas {
    /// Fill a rectangle with a gray level (0 black, 1 white).
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, gray: f32);
    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, line_width: f32);
    /// Draw text with its baseline at `y`.
    fn text(&mut self, text: &str, x: f32, y: f32, font: Font, size: f32);
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    /// Cell text
    pub content: String,
    /// Bold override for this cell
    pub bold: Option<bool>,
}

impl TableCell {
    /// Create a text cell.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            bold: None,
        }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::text("")
    }

    /// Make the cell bold.
    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Cells in column order
    pub cells: Vec<TableCell>,
    /// Background gray level
    pub background: Option<f32>,
    /// Header rows are bold
    pub is_header: bool,
}

impl TableRow {
    /// Create a body row.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            background: None,
            is_header: false,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            background: None,
            is_header: true,
        }
    }

    /// Set the row background gray level.
    pub fn background(mut self, gray: f32) -> Self {
        self.background = Some(gray);
        self
    }
}

/// Table style.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    /// Height of every row
    pub row_height: f32,
    /// Left padding of cell text
    pub padding: f32,
    /// Distance from row top to text baseline
    pub baseline: f32,
    /// Outline width of each row
    pub border_width: f32,
    /// Font size
    pub font_size: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            row_height: 8.0,
            padding: 2.0,
            baseline: 6.0,
            border_width: 0.5,
            font_size: 12.0,
        }
    }
}

/// A table with fixed column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column widths
    pub column_widths: Vec<f32>,
    /// Rows in display order
    pub rows: Vec<TableRow>,
    /// Style
    pub style: TableStyle,
}

/// Calculated table geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    /// Left edge of each column, relative to the table's left edge
    pub column_positions: Vec<f32>,
    /// Total table width
    pub total_width: f32,
    /// Total table height
    pub total_height: f32,
    /// Cell positions indexed by (row, col)
    pub cell_positions: Vec<Vec<CellPosition>>,
}

/// Position of a cell relative to the table origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPosition {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Cell width
    pub width: f32,
    /// Cell height
    pub height: f32,
}

impl Table {
    /// Create an empty table with the given column widths.
    pub fn new(column_widths: Vec<f32>) -> Self {
        Self {
            column_widths,
            rows: Vec::new(),
            style: TableStyle::default(),
        }
    }

    /// Append a row.
    pub fn with_row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Append a row in place.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Set the table style.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Calculate column and cell positions.
    pub fn calculate_layout(&self) -> TableLayout {
        let mut column_positions = Vec::with_capacity(self.column_widths.len());
        let mut x = 0.0;
        for width in &self.column_widths {
            column_positions.push(x);
            x += width;
        }
        let total_width = x;
        let row_height = self.style.row_height;

        let cell_positions = (0..self.rows.len())
            .map(|row| {
                self.column_widths
                    .iter()
                    .zip(&column_positions)
                    .map(|(width, x)| CellPosition {
                        x: *x,
                        y: row as f32 * row_height,
                        width: *width,
                        height: row_height,
                    })
                    .collect()
            })
            .collect();

        TableLayout {
            column_positions,
            total_width,
            total_height: self.rows.len() as f32 * row_height,
            cell_positions,
        }
    }

    /// Render the table with its top-left corner at (x, y).
    ///
    /// Returns the y coordinate of the table's bottom edge.
    pub fn render<C: TableCanvas>(&self, canvas: &mut C, x: f32, y: f32) -> f32 {
        let layout = self.calculate_layout();
        let style = &self.style;

        for (row, positions) in self.rows.iter().zip(&layout.cell_positions) {
            let row_top = y + positions.first().map(|p| p.y).unwrap_or(0.0);
            if let Some(gray) = row.background {
                canvas.fill_rect(x, row_top, layout.total_width, style.row_height, gray);
            }
            for (cell, pos) in row.cells.iter().zip(positions) {
                if cell.content.is_empty() {
                    continue;
                }
                let font = if cell.bold.unwrap_or(row.is_header) {
                    Font::HelveticaBold
                } else {
                    Font::Helvetica
                };
                canvas.text(
                    &cell.content,
                    x + pos.x + style.padding,
                    row_top + style.baseline,
                    font,
                    style.font_size,
                );
            }
            canvas.stroke_rect(x, row_top, layout.total_width, style.row_height, style.border_width);
        }

        y + layout.total_height
    }
}
