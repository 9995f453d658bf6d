//! "Cuentas": flat actuals, one row per account and month.

use quetzal_core::{CellPolicy, CuentaRecord, Month};
use quetzal_io::SheetTable;
use quetzal_recon::Totals;

use crate::layout::cuentas as layout;
use crate::table;
use crate::{ExtractError, Provenance};

/// Reads the data band into wire records. Rows without an area or with
/// an unrecognized month token are skipped.
pub fn records(
    sheet: &SheetTable,
    prov: &Provenance,
    policy: CellPolicy,
) -> Result<Vec<CuentaRecord>, ExtractError> {
    let mut out = Vec::new();
    for r in layout::FIRST_DATA_ROW..sheet.height() {
        let area = sheet.label(r, layout::AREA_COL);
        if area.is_empty() {
            continue;
        }
        let Some(mes) = Month::from_token(&sheet.label(r, layout::MES_COL)) else {
            continue;
        };
        out.push(CuentaRecord {
            area,
            sub_area: sheet.label(r, layout::SUB_AREA_COL),
            responsable: sheet.label(r, layout::RESPONSABLE_COL),
            cuenta: sheet.label(r, layout::CUENTA_COL),
            descripcion_cuenta: sheet.label(r, layout::DESCRIPCION_COL),
            merca: sheet.label(r, layout::MERCA_COL),
            mes,
            valor_real: table::number(sheet, r, layout::VALOR_COL, policy)?,
            year: prov.year,
            created_at: prov.created_at.clone(),
            source: prov.source.clone(),
        });
    }
    Ok(out)
}

/// Actuals summed per area.
pub fn area_totals(records: &[CuentaRecord]) -> Totals {
    let mut totals = Totals::new();
    for r in records {
        totals.add(&r.area, r.valor_real);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use quetzal_io::Cell;

    fn sheet() -> SheetTable {
        let row = |area: &str, cuenta: &str, mes: &str, valor: f64| {
            let mut cells = vec![Cell::Blank; 11];
            cells[layout::AREA_COL] = Cell::Text(area.into());
            cells[layout::SUB_AREA_COL] = Cell::Text("General".into());
            cells[layout::RESPONSABLE_COL] = Cell::Text("mlopez".into());
            cells[layout::CUENTA_COL] = Cell::Text(cuenta.into());
            cells[layout::DESCRIPCION_COL] = Cell::Text("Gastos".into());
            cells[layout::MERCA_COL] = Cell::Text("M1".into());
            cells[layout::MES_COL] = Cell::Text(mes.into());
            cells[layout::VALOR_COL] = Cell::Number(valor);
            cells
        };
        SheetTable::from_rows(
            layout::SHEET,
            vec![
                vec![Cell::Blank; 11],
                vec![Cell::Blank; 11],
                row("Ventas", "600100", "enero", 80.0),
                row("Ventas", "600200", "Febrero", 20.0),
                row("", "600300", "enero", 5.0),
                row("Operaciones", "600400", "total", 9.0),
            ],
        )
    }

    #[test]
    fn reads_rows_with_valid_area_and_month() {
        let prov = Provenance::at(2025, "ksb.xlsx", "2025-07-01 08:00:00");
        let recs = records(&sheet(), &prov, CellPolicy::FailFast).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].cuenta, "600100");
        assert_eq!(recs[0].mes, Month::Enero);
        assert_eq!(recs[1].mes, Month::Febrero);
    }

    #[test]
    fn totals_aggregate_per_area() {
        let prov = Provenance::at(2025, "ksb.xlsx", "2025-07-01 08:00:00");
        let recs = records(&sheet(), &prov, CellPolicy::FailFast).unwrap();
        let totals = area_totals(&recs);
        assert_eq!(totals.get("Ventas"), Some(100.0));
        assert_eq!(totals.len(), 1);
    }
}
