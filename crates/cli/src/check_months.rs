//! `qzl check-months`: workbook-internal sum checks, no store needed.
//! Every figure is recomputed from the month cells and compared
//! against the totals the sheet itself carries.

use quetzal_core::BudgetRow;
use quetzal_extract::{layout, ppto, resumen};
use quetzal_recon::{classify_all, entity_total, reconcile, reconcile_all, Totals};

use crate::output::Printer;
use crate::util::{read_workbook, CliError, Context};

fn single(entity: &str, value: f64) -> Totals {
    std::iter::once((entity.to_string(), value)).collect()
}

pub fn run(ctx: &Context) -> Result<(), CliError> {
    let data = read_workbook(ctx)?;
    let tolerance = ctx.settings.tolerance;
    let mut printer = Printer::new(ctx.json);

    // Annual column against the recomputed twelve-month sum, TOTAL row
    // included. This is a per-row invariant of the sheet.
    printer.section("resumen annual column vs month sums");
    let reported: Totals = data
        .resumen_rows
        .iter()
        .map(|r| (r.entity.clone(), r.annual_total))
        .collect();
    let recomputed: Totals = data
        .resumen_rows
        .iter()
        .map(|r| (r.entity.clone(), r.full_year_sum()))
        .collect();
    printer.report(
        classify_all(&reconcile_all(&reported, &recomputed), tolerance),
        "annual",
        "months",
    )?;

    // First-half totals recomputed positionally from the raw cells, as
    // a cross-check on the typed extraction.
    printer.section("resumen enero-junio, typed vs positional");
    let typed = resumen::area_totals(&data.resumen_rows, BudgetRow::first_half_sum);
    let positional = entity_total(
        &data.resumen_flat,
        layout::resumen::LABEL_COL,
        &layout::resumen::first_half_cols(),
        &[layout::resumen::TOTAL_LABEL, layout::resumen::HEADER_LABEL],
    );
    printer.report(
        classify_all(&reconcile_all(&typed, &positional), tolerance),
        "typed",
        "cells",
    )?;

    // The TOTAL row against the sum of the area rows.
    printer.section("resumen TOTAL row vs area sums");
    match resumen::total_row(&data.resumen_rows) {
        Some(total) => {
            let results = [
                reconcile(
                    &single("TOTAL (enero-junio)", total.first_half_sum()),
                    &single("TOTAL (enero-junio)", typed.grand_total()),
                    "TOTAL (enero-junio)",
                ),
                reconcile(
                    &single("TOTAL (anual)", total.full_year_sum()),
                    &single(
                        "TOTAL (anual)",
                        resumen::area_totals(&data.resumen_rows, BudgetRow::full_year_sum)
                            .grand_total(),
                    ),
                    "TOTAL (anual)",
                ),
            ];
            printer.report(classify_all(&results, tolerance), "total-row", "areas")?;
        }
        None => printer.note("no TOTAL row on the resumen sheet"),
    }

    // The PPTO rollup row against the recomputed cost-center sums.
    printer.section("ppto Total general vs cost-center sums");
    match data.ppto_grand_total {
        Some(rollup) => {
            let result = reconcile(
                &single(layout::ppto::GRAND_TOTAL_LABEL, rollup),
                &single(
                    layout::ppto::GRAND_TOTAL_LABEL,
                    ppto::center_totals(&data.ppto_rows).grand_total(),
                ),
                layout::ppto::GRAND_TOTAL_LABEL,
            );
            printer.report(classify_all(&[result], tolerance), "rollup", "centers")?;
        }
        None => printer.note("no Total general row on the ppto sheet"),
    }

    printer.finish()
}
