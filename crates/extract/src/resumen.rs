//! "Resumen": per-area monthly budgets with an annual column, a
//! freeze column and a TOTAL rollup row.

use quetzal_core::{BudgetRow, CellPolicy, Month, ResumenRecord};
use quetzal_io::{Cell, SheetTable};
use quetzal_recon::{FlatRow, Totals};

use crate::layout::resumen as layout;
use crate::table;
use crate::{ExtractError, Provenance};

/// Reads the data band into typed rows, TOTAL rollup included. Rows
/// with a blank label or a repeated header label are skipped.
pub fn budget_rows(
    sheet: &SheetTable,
    policy: CellPolicy,
) -> Result<Vec<BudgetRow>, ExtractError> {
    let mut rows = Vec::new();
    for r in layout::FIRST_DATA_ROW..=layout::LAST_DATA_ROW {
        let label = sheet.label(r, layout::LABEL_COL);
        if label.is_empty() || label == layout::HEADER_LABEL {
            continue;
        }
        let mut row = BudgetRow::new(label);
        for month in Month::ALL {
            row.set_month(
                month,
                table::number(sheet, r, layout::month_col(month), policy)?,
            );
        }
        row.annual_total = table::number(sheet, r, layout::ANNUAL_COL, policy)?;
        row.freeze = match sheet.cell(r, layout::FREEZE_COL) {
            Cell::Blank => None,
            _ => Some(table::number(sheet, r, layout::FREEZE_COL, policy)?),
        };
        rows.push(row);
    }
    Ok(rows)
}

pub fn total_row(rows: &[BudgetRow]) -> Option<&BudgetRow> {
    rows.iter().find(|r| r.entity == layout::TOTAL_LABEL)
}

pub fn area_rows(rows: &[BudgetRow]) -> impl Iterator<Item = &BudgetRow> {
    rows.iter().filter(|r| r.entity != layout::TOTAL_LABEL)
}

/// Per-area totals over an arbitrary projection, TOTAL excluded.
pub fn area_totals(rows: &[BudgetRow], value: impl Fn(&BudgetRow) -> f64) -> Totals {
    area_rows(rows)
        .map(|r| (r.entity.clone(), value(r)))
        .collect()
}

/// The same data band as untyped positional rows, for the independent
/// recomputation path.
pub fn flat_rows(sheet: &SheetTable, policy: CellPolicy) -> Result<Vec<FlatRow>, ExtractError> {
    let mut numeric: Vec<usize> = layout::month_cols().to_vec();
    numeric.push(layout::ANNUAL_COL);
    (layout::FIRST_DATA_ROW..=layout::LAST_DATA_ROW)
        .filter(|&r| !table::row_is_blank(sheet, r))
        .map(|r| table::flat_row(sheet, r, &numeric, policy))
        .collect()
}

/// Twelve wire records per area row, one per month.
pub fn records(rows: &[BudgetRow], prov: &Provenance) -> Vec<ResumenRecord> {
    let mut out = Vec::with_capacity(rows.len() * 12);
    for row in area_rows(rows).chain(total_row(rows)) {
        for month in Month::ALL {
            out.push(ResumenRecord {
                area: row.entity.clone(),
                mes: month,
                year: prov.year,
                presupuesto_mensual: row.month(month),
                total_anual: row.annual_total,
                freeze: row.freeze.unwrap_or(0.0),
                created_at: prov.created_at.clone(),
                source: prov.source.clone(),
            });
        }
    }
    out
}
