//! Policy-aware cell access on top of the raw sheet tables.

use quetzal_core::CellPolicy;
use quetzal_io::{Cell, SheetTable};
use quetzal_recon::{CellData, FlatRow};

use crate::error::ExtractError;

/// Reads a numeric position. Blanks are zero; text is an error under
/// `FailFast` and zero under `ZeroFill`.
pub fn number(
    table: &SheetTable,
    row: usize,
    col: usize,
    policy: CellPolicy,
) -> Result<f64, ExtractError> {
    match table.cell(row, col) {
        Cell::Number(n) | Cell::DateTime(n) => Ok(*n),
        Cell::Blank => Ok(0.0),
        Cell::Text(s) => match policy {
            CellPolicy::ZeroFill => Ok(0.0),
            CellPolicy::FailFast => Err(ExtractError::MalformedCell {
                sheet: table.name().to_string(),
                row,
                col,
                found: s.clone(),
            }),
        },
    }
}

/// Converts one physical row into an untyped [`FlatRow`], enforcing the
/// policy on the positions the caller declares numeric.
pub fn flat_row(
    table: &SheetTable,
    row: usize,
    numeric_cols: &[usize],
    policy: CellPolicy,
) -> Result<FlatRow, ExtractError> {
    let mut cells = Vec::with_capacity(table.width());
    for col in 0..table.width() {
        let data = match table.cell(row, col) {
            Cell::Blank => CellData::Blank,
            Cell::Number(n) | Cell::DateTime(n) => CellData::Number(*n),
            Cell::Text(s) => {
                if numeric_cols.contains(&col) && policy == CellPolicy::FailFast {
                    return Err(ExtractError::MalformedCell {
                        sheet: table.name().to_string(),
                        row,
                        col,
                        found: s.clone(),
                    });
                }
                CellData::Text(s.clone())
            }
        };
        cells.push(data);
    }
    Ok(FlatRow::new(cells))
}

/// True when every cell on the row is blank.
pub fn row_is_blank(table: &SheetTable, row: usize) -> bool {
    (0..table.width()).all(|col| table.cell(row, col).is_blank())
}
