//! `qzl verify`: recompute totals from the stored documents alone and
//! check them for internal consistency. Catches a bad or partial load
//! without needing the workbook at hand.

use serde::Serialize;

use quetzal_core::records::collections;
use quetzal_extract::layout;
use quetzal_io::{doc_f64, doc_str, DocumentStore, Filter, SqliteStore};
use quetzal_recon::{classify_all, reconcile, reconcile_all, Totals};

use crate::output::Printer;
use crate::util::{CliError, Context};

#[derive(Debug, Serialize)]
struct CollectionCount<'a> {
    collection: &'a str,
    documents: usize,
}

#[derive(Debug, Serialize)]
struct CollectionSum<'a> {
    collection: &'a str,
    field: &'a str,
    sum: f64,
}

fn single(entity: &str, value: f64) -> Totals {
    std::iter::once((entity.to_string(), value)).collect()
}

fn report_sum(
    printer: &Printer,
    store: &SqliteStore,
    filter: &Filter,
    collection: &'static str,
    field: &'static str,
) -> Result<(), CliError> {
    let sum: f64 = store
        .find(collection, filter)?
        .iter()
        .map(|doc| doc_f64(doc, field))
        .sum();
    printer.note(format!("{collection}.{field}: {sum:.2}"));
    printer.value(&CollectionSum {
        collection,
        field,
        sum,
    })?;
    Ok(())
}

pub fn run(ctx: &Context) -> Result<(), CliError> {
    let store = ctx.open_existing_store()?;
    let tolerance = ctx.settings.tolerance;
    let year_filter = Filter::new().eq("year", ctx.settings.year);
    let mut printer = Printer::new(ctx.json);

    printer.section("document counts");
    for collection in collections::ALL {
        let documents = store.count(collection)?;
        printer.note(format!("{collection}: {documents} documents"));
        printer.value(&CollectionCount {
            collection,
            documents,
        })?;
    }

    // Per area, the twelve stored monthly documents must sum to the
    // annual total each of them repeats.
    printer.section("resumen month documents vs stored annual totals");
    let docs = store.find(collections::RESUMEN, &year_filter)?;
    let mut monthly = Totals::new();
    let mut annual = Totals::new();
    for doc in &docs {
        let area = doc_str(doc, "area");
        monthly.add(area, doc_f64(doc, "presupuesto_mensual"));
        if !annual.contains(area) {
            annual.add(area, doc_f64(doc, "total_anual"));
        }
    }
    let mut area_monthly = Totals::new();
    let mut total_monthly = 0.0;
    for (area, sum) in monthly.iter() {
        if area == layout::resumen::TOTAL_LABEL {
            total_monthly = sum;
        } else {
            area_monthly.add(area, sum);
        }
    }
    printer.report(
        classify_all(&reconcile_all(&annual, &monthly), tolerance),
        "annual",
        "months",
    )?;

    // The stored TOTAL documents against the sum of the area documents.
    printer.section("resumen TOTAL documents vs area documents");
    if monthly.contains(layout::resumen::TOTAL_LABEL) {
        let result = reconcile(
            &single(layout::resumen::TOTAL_LABEL, total_monthly),
            &single(layout::resumen::TOTAL_LABEL, area_monthly.grand_total()),
            layout::resumen::TOTAL_LABEL,
        );
        printer.report(classify_all(&[result], tolerance), "total-docs", "areas")?;
    } else {
        printer.note("no TOTAL documents stored");
    }

    printer.section("collection sums");
    report_sum(
        &printer,
        &store,
        &year_filter,
        collections::PPTO,
        "presupuesto",
    )?;
    report_sum(
        &printer,
        &store,
        &year_filter,
        collections::TRANSACCIONES,
        "valor_moneda_objeto",
    )?;
    report_sum(
        &printer,
        &store,
        &year_filter,
        collections::RECLASIFICACIONES,
        "valor_moneda_objeto",
    )?;
    report_sum(
        &printer,
        &store,
        &year_filter,
        collections::CUENTAS,
        "valor_real",
    )?;

    printer.finish()
}
