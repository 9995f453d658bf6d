//! "Data" and "Reclasificación de gastos": transaction dumps addressed
//! by header name. Both sheets share the same header vocabulary;
//! reclassified rows additionally carry a `tipo_operacion` tag.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use quetzal_core::{CellPolicy, Month, TransaccionRecord};
use quetzal_io::{Cell, SheetTable};

use crate::layout::data as layout;
use crate::table;
use crate::{ExtractError, Provenance};

/// Header positions resolved against the first row.
#[derive(Debug)]
pub struct Columns {
    valor: usize,
    centro: Option<usize>,
    clase: Option<usize>,
    denom_clase: Option<usize>,
    documento: Option<usize>,
    moneda: Option<usize>,
    texto: Option<usize>,
    documento_compras: Option<usize>,
    usuario: Option<usize>,
    ejercicio: Option<usize>,
    denominacion: Option<usize>,
    descrip_clases: Option<usize>,
    valor_variable: Option<usize>,
    merca: Option<usize>,
    fecha: Option<usize>,
}

impl Columns {
    /// Resolves the header row. The value column is the only one the
    /// audits depend on, so it is the only one required.
    pub fn resolve(sheet: &SheetTable) -> Result<Columns, ExtractError> {
        let mut by_name = HashMap::new();
        for col in 0..sheet.width() {
            let name = sheet.label(layout::HEADER_ROW, col);
            if !name.is_empty() {
                by_name.entry(name).or_insert(col);
            }
        }
        let valor =
            *by_name
                .get(layout::VALOR)
                .ok_or_else(|| ExtractError::MissingColumn {
                    sheet: sheet.name().to_string(),
                    header: layout::VALOR.to_string(),
                })?;
        Ok(Columns {
            valor,
            centro: by_name.get(layout::CENTRO).copied(),
            clase: by_name.get(layout::CLASE).copied(),
            denom_clase: by_name.get(layout::DENOM_CLASE).copied(),
            documento: by_name.get(layout::DOCUMENTO).copied(),
            moneda: by_name.get(layout::MONEDA).copied(),
            texto: by_name.get(layout::TEXTO).copied(),
            documento_compras: by_name.get(layout::DOCUMENTO_COMPRAS).copied(),
            usuario: by_name.get(layout::USUARIO).copied(),
            ejercicio: by_name.get(layout::EJERCICIO).copied(),
            denominacion: by_name.get(layout::DENOMINACION).copied(),
            descrip_clases: by_name.get(layout::DESCRIP_CLASES).copied(),
            valor_variable: by_name.get(layout::VALOR_VARIABLE).copied(),
            merca: by_name.get(layout::MERCA).copied(),
            fecha: by_name.get(layout::FECHA).copied(),
        })
    }

    /// Optional headers that were expected but not found. An absent
    /// header leaves its field empty on every record, which is easy to
    /// miss, so callers should surface this list.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.centro, layout::CENTRO),
            (self.clase, layout::CLASE),
            (self.denom_clase, layout::DENOM_CLASE),
            (self.documento, layout::DOCUMENTO),
            (self.moneda, layout::MONEDA),
            (self.texto, layout::TEXTO),
            (self.documento_compras, layout::DOCUMENTO_COMPRAS),
            (self.usuario, layout::USUARIO),
            (self.ejercicio, layout::EJERCICIO),
            (self.denominacion, layout::DENOMINACION),
            (self.descrip_clases, layout::DESCRIP_CLASES),
            (self.valor_variable, layout::VALOR_VARIABLE),
            (self.merca, layout::MERCA),
            (self.fecha, layout::FECHA),
        ]
        .into_iter()
        .filter(|(col, _)| col.is_none())
        .map(|(_, header)| header)
        .collect()
    }
}

/// Expected headers absent from a sheet's first row.
pub fn missing_headers(sheet: &SheetTable) -> Result<Vec<&'static str>, ExtractError> {
    Ok(Columns::resolve(sheet)?.missing())
}

/// Excel stores dates as day counts from 1899-12-30.
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial as i64))
}

fn parse_text_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%d.%m.%Y"))
        .ok()
}

fn posting_date(sheet: &SheetTable, row: usize, col: Option<usize>) -> Option<NaiveDate> {
    match sheet.cell(row, col?) {
        Cell::DateTime(serial) | Cell::Number(serial) => serial_to_date(*serial),
        Cell::Text(s) => parse_text_date(s),
        Cell::Blank => None,
    }
}

fn label(sheet: &SheetTable, row: usize, col: Option<usize>) -> String {
    col.map(|c| sheet.label(row, c)).unwrap_or_default()
}

/// Informational numeric column; anything unreadable counts as zero.
fn numeric(sheet: &SheetTable, row: usize, col: Option<usize>) -> f64 {
    match col.map(|c| sheet.cell(row, c)) {
        Some(Cell::Number(v)) | Some(Cell::DateTime(v)) => *v,
        _ => 0.0,
    }
}

/// Reads every non-blank data row into a wire record. Rows whose
/// posting date cannot be read keep an empty month token.
pub fn records(
    sheet: &SheetTable,
    prov: &Provenance,
    policy: CellPolicy,
    tipo_operacion: Option<&str>,
) -> Result<Vec<TransaccionRecord>, ExtractError> {
    let cols = Columns::resolve(sheet)?;
    let mut out = Vec::new();
    for r in layout::HEADER_ROW + 1..sheet.height() {
        if table::row_is_blank(sheet, r) {
            continue;
        }
        let date = posting_date(sheet, r, cols.fecha);
        let (fecha, mes) = match date {
            Some(d) => {
                let mes = Month::from_number(d.month())
                    .map(|m| m.token().to_string())
                    .unwrap_or_default();
                (d.format("%Y-%m-%d").to_string(), mes)
            }
            None => (String::new(), String::new()),
        };
        out.push(TransaccionRecord {
            centro_coste: label(sheet, r, cols.centro),
            clase_coste: label(sheet, r, cols.clase),
            denom_clase_coste: label(sheet, r, cols.denom_clase),
            num_documento: label(sheet, r, cols.documento),
            valor_moneda_objeto: table::number(sheet, r, cols.valor, policy)?,
            moneda_objeto: label(sheet, r, cols.moneda),
            texto_cabecera: label(sheet, r, cols.texto),
            documento_compras: label(sheet, r, cols.documento_compras),
            usuario: label(sheet, r, cols.usuario),
            ejercicio: label(sheet, r, cols.ejercicio),
            denominacion_objeto: label(sheet, r, cols.denominacion),
            descrip_clases_coste: label(sheet, r, cols.descrip_clases),
            valor_variable_mi: numeric(sheet, r, cols.valor_variable),
            merca: label(sheet, r, cols.merca),
            fecha_contabilizacion: fecha,
            mes,
            year: prov.year,
            tipo_operacion: tipo_operacion.map(str::to_string),
            created_at: prov.created_at.clone(),
            source: prov.source.clone(),
        });
    }
    Ok(out)
}

/// Sum of the value column over every non-blank data row.
pub fn total_value(sheet: &SheetTable, policy: CellPolicy) -> Result<f64, ExtractError> {
    let cols = Columns::resolve(sheet)?;
    let mut total = 0.0;
    for r in layout::HEADER_ROW + 1..sheet.height() {
        if table::row_is_blank(sheet, r) {
            continue;
        }
        total += table::number(sheet, r, cols.valor, policy)?;
    }
    Ok(total)
}
