//! Wire-contract records.
//!
//! These structs are the flat-record schemas shared by the CSV extracts and
//! the document store collections. Field names are the contract — the
//! reconciliation and reporting stages address documents by these exact
//! names, so serde renames are not allowed here.

use serde::{Deserialize, Serialize};

use crate::month::Month;

/// Collection / extract file names.
pub mod collections {
    pub const RESUMEN: &str = "resumen_presupuesto";
    pub const PPTO: &str = "presupuesto_detallado";
    pub const TRANSACCIONES: &str = "transacciones";
    pub const RECLASIFICACIONES: &str = "reclasificaciones";
    pub const CUENTAS: &str = "cuentas_reales";

    pub const ALL: [&str; 5] = [RESUMEN, PPTO, TRANSACCIONES, RECLASIFICACIONES, CUENTAS];
}

/// Budget per area and month, from the summary sheet. One record per
/// (area, month); the annual total and freeze repeat on every record of an
/// area, mirroring the source row they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumenRecord {
    pub area: String,
    pub mes: Month,
    pub year: i32,
    pub presupuesto_mensual: f64,
    pub total_anual: f64,
    pub freeze: f64,
    pub created_at: String,
    pub source: String,
}

/// Budget per cost center and month, from the detail sheet. Zero or absent
/// month values produce no record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PptoRecord {
    pub moneda: String,
    pub centro_coste: String,
    pub denominacion_objeto: String,
    pub mes: Month,
    pub presupuesto: f64,
    pub total_anual: f64,
    pub year: i32,
    pub created_at: String,
    pub source: String,
}

/// One ledger transaction, from the transactions sheet. The same shape is
/// reused for expense reclassifications, which additionally carry
/// `tipo_operacion = "reclasificacion"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransaccionRecord {
    pub centro_coste: String,
    pub clase_coste: String,
    pub denom_clase_coste: String,
    pub num_documento: String,
    pub valor_moneda_objeto: f64,
    pub moneda_objeto: String,
    pub texto_cabecera: String,
    pub documento_compras: String,
    pub usuario: String,
    /// Fiscal year column as it appears on the sheet, empty if absent.
    pub ejercicio: String,
    pub denominacion_objeto: String,
    pub descrip_clases_coste: String,
    pub valor_variable_mi: f64,
    pub merca: String,
    /// `%Y-%m-%d`, empty when the posting date could not be parsed.
    pub fecha_contabilizacion: String,
    /// Empty when the posting date could not be parsed.
    pub mes: String,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_operacion: Option<String>,
    pub created_at: String,
    pub source: String,
}

/// Actuals per account, from the accounts sheet. Rows without a valid area
/// or month are skipped at extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuentaRecord {
    pub area: String,
    pub sub_area: String,
    pub responsable: String,
    pub cuenta: String,
    pub descripcion_cuenta: String,
    pub merca: String,
    pub mes: Month,
    pub valor_real: f64,
    pub year: i32,
    pub created_at: String,
    pub source: String,
}
