//! "PPTO": per-cost-center budgets for the first half of the year,
//! closed by a "Total general" rollup row.

use quetzal_core::{CellPolicy, Month, PptoRecord};
use quetzal_io::SheetTable;
use quetzal_recon::Totals;

use crate::layout::ppto as layout;
use crate::table;
use crate::{ExtractError, Provenance};

#[derive(Debug, Clone)]
pub struct CostCenterRow {
    pub moneda: String,
    pub centro: String,
    pub denominacion: String,
    /// Enero..junio.
    pub months: [f64; layout::MONTH_COUNT],
    pub annual_total: f64,
}

impl CostCenterRow {
    pub fn month(&self, month: Month) -> f64 {
        self.months[month.index()]
    }

    pub fn first_half_sum(&self) -> f64 {
        self.months.iter().sum()
    }
}

fn is_grand_total(sheet: &SheetTable, row: usize) -> bool {
    sheet
        .label(row, layout::MONEDA_COL)
        .contains(layout::GRAND_TOTAL_LABEL)
}

/// Reads the data band into typed rows. The trailing rollup row and
/// rows without a cost center label are skipped.
pub fn cost_center_rows(
    sheet: &SheetTable,
    policy: CellPolicy,
) -> Result<Vec<CostCenterRow>, ExtractError> {
    let mut rows = Vec::new();
    for r in layout::FIRST_DATA_ROW..sheet.height() {
        if is_grand_total(sheet, r) {
            continue;
        }
        let centro = sheet.label(r, layout::CENTRO_COL);
        if centro.is_empty() {
            continue;
        }
        let mut months = [0.0; layout::MONTH_COUNT];
        for (i, col) in layout::month_cols().into_iter().enumerate() {
            months[i] = table::number(sheet, r, col, policy)?;
        }
        rows.push(CostCenterRow {
            moneda: sheet.label(r, layout::MONEDA_COL),
            centro,
            denominacion: sheet.label(r, layout::DENOMINACION_COL),
            months,
            annual_total: table::number(sheet, r, layout::ANNUAL_COL, policy)?,
        });
    }
    Ok(rows)
}

/// The sheet's own rollup figure, read off the "Total general" row.
pub fn grand_total(
    sheet: &SheetTable,
    policy: CellPolicy,
) -> Result<Option<f64>, ExtractError> {
    for r in (layout::FIRST_DATA_ROW..sheet.height()).rev() {
        if is_grand_total(sheet, r) {
            return table::number(sheet, r, layout::ANNUAL_COL, policy).map(Some);
        }
    }
    Ok(None)
}

/// First-half totals keyed by cost center.
pub fn center_totals(rows: &[CostCenterRow]) -> Totals {
    rows.iter()
        .map(|r| (r.centro.clone(), r.first_half_sum()))
        .collect()
}

/// Wire records, one per cost center and month. Months with no budget
/// assigned are omitted.
pub fn records(rows: &[CostCenterRow], prov: &Provenance) -> Vec<PptoRecord> {
    let mut out = Vec::new();
    for row in rows {
        for month in Month::FIRST_HALF {
            let presupuesto = row.month(month);
            if presupuesto == 0.0 {
                continue;
            }
            out.push(PptoRecord {
                moneda: row.moneda.clone(),
                centro_coste: row.centro.clone(),
                denominacion_objeto: row.denominacion.clone(),
                mes: month,
                presupuesto,
                total_anual: row.annual_total,
                year: prov.year,
                created_at: prov.created_at.clone(),
                source: prov.source.clone(),
            });
        }
    }
    out
}
