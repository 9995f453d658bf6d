//! `qzl extract`: one CSV per collection plus a manifest.

use std::path::Path;

use serde::Serialize;

use quetzal_core::records::collections;
use quetzal_extract::layout;
use quetzal_io::write_records;

use crate::output::Printer;
use crate::util::{read_workbook, CliError, Context};

#[derive(Debug, Serialize)]
struct ManifestRow<'a> {
    collection: &'a str,
    sheet: &'a str,
    rows: usize,
    source: &'a str,
    created_at: &'a str,
}

pub fn run(ctx: &Context, out: Option<&Path>) -> Result<(), CliError> {
    let data = read_workbook(ctx)?;
    let dir = out.unwrap_or(&ctx.settings.csv_dir);
    let printer = Printer::new(ctx.json);

    let mut manifest: Vec<(&str, &str, usize)> = vec![
        (
            collections::RESUMEN,
            layout::resumen::SHEET,
            write_records(&dir.join(file_name(collections::RESUMEN)), &data.resumen)?,
        ),
        (
            collections::PPTO,
            layout::ppto::SHEET,
            write_records(&dir.join(file_name(collections::PPTO)), &data.ppto)?,
        ),
        (
            collections::TRANSACCIONES,
            layout::data::SHEET,
            write_records(
                &dir.join(file_name(collections::TRANSACCIONES)),
                &data.transacciones,
            )?,
        ),
    ];
    if !data.reclasificaciones.is_empty() {
        manifest.push((
            collections::RECLASIFICACIONES,
            layout::data::RECLASIFICACION_SHEET,
            write_records(
                &dir.join(file_name(collections::RECLASIFICACIONES)),
                &data.reclasificaciones,
            )?,
        ));
    }
    manifest.push((
        collections::CUENTAS,
        layout::cuentas::SHEET,
        write_records(&dir.join(file_name(collections::CUENTAS)), &data.cuentas)?,
    ));

    let rows: Vec<ManifestRow<'_>> = manifest
        .iter()
        .map(|&(collection, sheet, rows)| ManifestRow {
            collection,
            sheet,
            rows,
            source: &data.prov.source,
            created_at: &data.prov.created_at,
        })
        .collect();
    write_records(&dir.join("summary.csv"), &rows)?;

    for row in &rows {
        printer.note(format!(
            "{}: {} rows -> {}",
            row.collection,
            row.rows,
            dir.join(file_name(row.collection)).display()
        ));
        printer.value(row)?;
    }
    printer.note(format!("manifest -> {}", dir.join("summary.csv").display()));
    Ok(())
}

fn file_name(collection: &str) -> String {
    format!("{collection}.csv")
}
