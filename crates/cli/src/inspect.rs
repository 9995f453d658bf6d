//! `qzl inspect`: workbook diagnostics for layout drift. Shows sheet
//! dimensions and, per sheet, the rows that actually carry data, so a
//! template change is visible before it breaks an audit.

use serde::Serialize;

use quetzal_io::SheetTable;

use crate::output::Printer;
use crate::util::{CliError, Context};

#[derive(Debug, Serialize)]
struct SheetInfo {
    sheet: String,
    rows: usize,
    cols: usize,
    significant_rows: usize,
}

#[derive(Debug, Serialize)]
struct RowInfo<'a> {
    sheet: &'a str,
    row: usize,
    cells: usize,
    preview: String,
}

fn significant_cells(table: &SheetTable, row: usize) -> usize {
    (0..table.width())
        .filter(|&col| !table.cell(row, col).is_blank())
        .count()
}

fn preview(table: &SheetTable, row: usize) -> String {
    let mut parts = Vec::new();
    for col in 0..table.width() {
        if table.cell(row, col).is_blank() {
            continue;
        }
        parts.push(format!("c{col}={}", table.label(row, col)));
        if parts.len() == 8 {
            parts.push("...".to_string());
            break;
        }
    }
    parts.join(" ")
}

pub fn run(ctx: &Context, sheet: Option<&str>, threshold: usize) -> Result<(), CliError> {
    let mut wb = ctx.open_workbook()?;
    let printer = Printer::new(ctx.json);

    match sheet {
        None => {
            for name in wb.sheet_names() {
                let table = wb.table(&name)?;
                let significant = (0..table.height())
                    .filter(|&r| significant_cells(&table, r) >= threshold)
                    .count();
                printer.note(format!(
                    "{name}: {} rows x {} cols, {significant} significant",
                    table.height(),
                    table.width()
                ));
                printer.value(&SheetInfo {
                    sheet: name,
                    rows: table.height(),
                    cols: table.width(),
                    significant_rows: significant,
                })?;
            }
        }
        Some(name) => {
            let table = wb.table(name)?;
            for row in 0..table.height() {
                let cells = significant_cells(&table, row);
                if cells < threshold {
                    continue;
                }
                printer.note(format!(
                    "row {row:>4} ({cells:>2} cells): {}",
                    preview(&table, row)
                ));
                printer.value(&RowInfo {
                    sheet: name,
                    row,
                    cells,
                    preview: preview(&table, row),
                })?;
            }
        }
    }
    Ok(())
}
