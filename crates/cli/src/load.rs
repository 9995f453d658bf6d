//! `qzl load`: replace every collection in the document store with the
//! current workbook contents. Each collection swap is atomic, so a
//! concurrent reader sees either the old rows or the new ones.

use serde::Serialize;
use serde_json::Value;

use quetzal_core::records::collections;
use quetzal_io::DocumentStore;

use crate::exit_codes::EXIT_ERROR;
use crate::output::Printer;
use crate::util::{read_workbook, CliError, Context};

#[derive(Debug, Serialize)]
struct LoadedCollection<'a> {
    collection: &'a str,
    loaded: usize,
    stored: usize,
}

fn to_docs<T: Serialize>(records: &[T]) -> Result<Vec<Value>, CliError> {
    records
        .iter()
        .map(|r| serde_json::to_value(r).map_err(|e| CliError::new(EXIT_ERROR, e.to_string())))
        .collect()
}

pub fn run(ctx: &Context) -> Result<(), CliError> {
    let data = read_workbook(ctx)?;
    let mut store = ctx.open_store()?;
    let printer = Printer::new(ctx.json);

    let batches: Vec<(&str, Vec<Value>)> = vec![
        (collections::RESUMEN, to_docs(&data.resumen)?),
        (collections::PPTO, to_docs(&data.ppto)?),
        (collections::TRANSACCIONES, to_docs(&data.transacciones)?),
        (
            collections::RECLASIFICACIONES,
            to_docs(&data.reclasificaciones)?,
        ),
        (collections::CUENTAS, to_docs(&data.cuentas)?),
    ];

    for (collection, docs) in &batches {
        let collection = *collection;
        let loaded = store.replace_collection(collection, docs)?;
        let stored = store.count(collection)?;
        printer.note(format!("{collection}: {loaded} loaded, {stored} stored"));
        printer.value(&LoadedCollection {
            collection,
            loaded,
            stored,
        })?;
    }
    printer.note(format!(
        "store -> {} (source {}, year {})",
        ctx.settings.store.display(),
        data.prov.source,
        data.prov.year
    ));
    Ok(())
}
