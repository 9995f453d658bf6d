//! `qzl audit`: reconcile the workbook against the document store,
//! collection by collection. The workbook is read fresh, so a stale
//! load shows up as a mismatch rather than passing silently.

use quetzal_core::records::collections;
use quetzal_core::{BudgetRow, Month};
use quetzal_extract::{cuentas, layout, resumen};
use quetzal_io::{doc_f64, doc_str, DocumentStore, Filter, SqliteStore};
use quetzal_recon::{classify_all, reconcile, reconcile_all, Totals};

use crate::output::Printer;
use crate::util::{read_workbook, CliError, Context};

fn first_half_tokens() -> Vec<&'static str> {
    Month::FIRST_HALF.iter().map(|m| m.token()).collect()
}

/// Per-entity sums over a stored collection.
fn store_totals(
    store: &SqliteStore,
    collection: &str,
    key_field: &str,
    value_field: &str,
    filter: &Filter,
) -> Result<Totals, CliError> {
    let mut totals = Totals::new();
    for doc in store.find(collection, filter)? {
        totals.add(doc_str(&doc, key_field), doc_f64(&doc, value_field));
    }
    Ok(totals)
}

fn store_sum(
    store: &SqliteStore,
    collection: &str,
    value_field: &str,
    filter: &Filter,
) -> Result<f64, CliError> {
    Ok(store
        .find(collection, filter)?
        .iter()
        .map(|doc| doc_f64(doc, value_field))
        .sum())
}

fn single(entity: &str, value: f64) -> Totals {
    std::iter::once((entity.to_string(), value)).collect()
}

pub fn run(ctx: &Context) -> Result<(), CliError> {
    let data = read_workbook(ctx)?;
    let store = ctx.open_existing_store()?;
    let tolerance = ctx.settings.tolerance;
    let year = ctx.settings.year;
    let mut printer = Printer::new(ctx.json);

    // Resumen, per area over enero..junio.
    printer.section("resumen areas, enero-junio (excel vs store)");
    let excel = resumen::area_totals(&data.resumen_rows, BudgetRow::first_half_sum);
    let filter = Filter::new()
        .eq("year", year)
        .is_in("mes", first_half_tokens());
    let stored = store_totals(
        &store,
        collections::RESUMEN,
        "area",
        "presupuesto_mensual",
        &filter,
    )?;
    let mut area_docs = Totals::new();
    let mut total_doc = 0.0;
    for (entity, value) in stored.iter() {
        if entity == layout::resumen::TOTAL_LABEL {
            total_doc = value;
        } else {
            area_docs.add(entity, value);
        }
    }
    printer.report(
        classify_all(&reconcile_all(&excel, &area_docs), tolerance),
        "excel",
        "store",
    )?;

    // Resumen TOTAL row against the stored rollup documents.
    printer.section("resumen TOTAL, enero-junio (excel vs store)");
    if let Some(total_row) = resumen::total_row(&data.resumen_rows) {
        let result = reconcile(
            &single(layout::resumen::TOTAL_LABEL, total_row.first_half_sum()),
            &single(layout::resumen::TOTAL_LABEL, total_doc),
            layout::resumen::TOTAL_LABEL,
        );
        printer.report(classify_all(&[result], tolerance), "excel", "store")?;
    } else {
        printer.note("no TOTAL row on the resumen sheet");
    }

    // PPTO grand total.
    printer.section("ppto, enero-junio (excel vs store)");
    let excel_ppto = match data.ppto_grand_total {
        Some(total) => total,
        None => data
            .ppto_rows
            .iter()
            .map(|r| r.first_half_sum())
            .sum(),
    };
    let stored_ppto = store_sum(
        &store,
        collections::PPTO,
        "presupuesto",
        &Filter::new().eq("year", year),
    )?;
    let result = reconcile(
        &single("PPTO", excel_ppto),
        &single("PPTO", stored_ppto),
        "PPTO",
    );
    printer.report(classify_all(&[result], tolerance), "excel", "store")?;

    // Transaction dumps, grand totals only.
    printer.section("transacciones (excel vs store)");
    let stored_data = store_sum(
        &store,
        collections::TRANSACCIONES,
        "valor_moneda_objeto",
        &Filter::new().eq("year", year),
    )?;
    let result = reconcile(
        &single("Data", data.data_total),
        &single("Data", stored_data),
        "Data",
    );
    printer.report(classify_all(&[result], tolerance), "excel", "store")?;

    if let Some(reclas_total) = data.reclas_total {
        printer.section("reclasificaciones (excel vs store)");
        let stored_reclas = store_sum(
            &store,
            collections::RECLASIFICACIONES,
            "valor_moneda_objeto",
            &Filter::new().eq("year", year),
        )?;
        let result = reconcile(
            &single("Reclasificación", reclas_total),
            &single("Reclasificación", stored_reclas),
            "Reclasificación",
        );
        printer.report(classify_all(&[result], tolerance), "excel", "store")?;
    }

    // Actuals, per area.
    printer.section("cuentas reales areas (excel vs store)");
    let excel_cuentas = cuentas::area_totals(&data.cuentas);
    let stored_cuentas = store_totals(
        &store,
        collections::CUENTAS,
        "area",
        "valor_real",
        &Filter::new().eq("year", year),
    )?;
    printer.report(
        classify_all(&reconcile_all(&excel_cuentas, &stored_cuentas), tolerance),
        "excel",
        "store",
    )?;

    printer.finish()
}
