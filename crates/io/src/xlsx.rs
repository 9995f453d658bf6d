// Excel workbook import (xlsx, xls, xlsb, ods) into positional sheet tables.
//
// One-way, values-only conversion: cached values are what the audit compares,
// formulas are never evaluated here.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use crate::error::IoError;

/// One typed cell as read from the workbook. No policy is applied at this
/// layer; extraction decides how non-numeric cells in numeric positions are
/// treated.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Blank,
    Number(f64),
    Text(String),
    /// Excel serial date (1900 system). Converted to a calendar date by the
    /// extraction stage.
    DateTime(f64),
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Blank)
    }

    /// Cell as a label: blank is the empty string, integral numbers render
    /// without a decimal point (cost-center codes come in as floats).
    pub fn label(&self) -> String {
        match self {
            Cell::Blank => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) | Cell::DateTime(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
        }
    }
}

/// A fully materialized sheet addressed by absolute zero-based (row, col).
///
/// Leading blank rows/columns of the used range are padded so positions
/// match the physical sheet — the layout offsets are absolute.
#[derive(Debug, Clone)]
pub struct SheetTable {
    name: String,
    rows: Vec<Vec<Cell>>,
}

impl SheetTable {
    /// Build a table directly from rows. Used by tests and by anything that
    /// synthesizes sheet data.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of physical rows (including padded leading blanks).
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at (row, col); out-of-range positions read as blank.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        const BLANK: &Cell = &Cell::Blank;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(BLANK)
    }

    pub fn label(&self, row: usize, col: usize) -> String {
        self.cell(row, col).label()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

/// An opened workbook. Sheets are read lazily by name.
pub struct BudgetWorkbook {
    inner: Sheets<std::io::BufReader<std::fs::File>>,
    path: String,
}

impl std::fmt::Debug for BudgetWorkbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetWorkbook")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl BudgetWorkbook {
    /// Open an Excel file. A missing or unreadable file is fatal.
    pub fn open(path: &Path) -> Result<Self, IoError> {
        let inner = open_workbook_auto(path).map_err(|e| IoError::Workbook {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        Ok(Self {
            inner,
            path: path.display().to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names().to_vec()
    }

    /// Read one sheet into a positional table. A missing sheet is fatal.
    pub fn table(&mut self, sheet: &str) -> Result<SheetTable, IoError> {
        let range = self
            .inner
            .worksheet_range(sheet)
            .map_err(|e| IoError::Sheet {
                sheet: sheet.to_string(),
                detail: e.to_string(),
            })?;

        // The used range may not begin at A1; pad so table positions are
        // absolute sheet positions.
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row as usize];

        for row in range.rows() {
            let mut cells: Vec<Cell> = vec![Cell::Blank; start_col as usize];
            cells.extend(row.iter().map(convert_cell));
            rows.push(cells);
        }

        Ok(SheetTable::from_rows(sheet, rows))
    }
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Blank,
        Data::String(s) => {
            if s.trim().is_empty() {
                Cell::Blank
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
        Data::DateTime(dt) => Cell::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
