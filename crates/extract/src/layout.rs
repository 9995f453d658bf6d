//! Positional layout of the KSB export workbook.
//!
//! Offsets are physical sheet coordinates, zero-based, header rows
//! included. They come from the export template in production use and
//! must be revised together whenever the template changes; bump
//! [`LAYOUT_VERSION`] when they do.

use quetzal_core::Month;

/// Identifies the template revision these offsets were taken from.
pub const LAYOUT_VERSION: &str = "ksb-export-v1";

/// "Resumen": one row per area, months across the columns.
pub mod resumen {
    use super::Month;

    pub const SHEET: &str = "Resumen";

    /// Area label, "TOTAL" on the rollup row.
    pub const LABEL_COL: usize = 1;
    /// Enero..Diciembre, one column per month.
    pub const FIRST_MONTH_COL: usize = 2;
    pub const ANNUAL_COL: usize = 14;
    pub const FREEZE_COL: usize = 15;

    pub const FIRST_DATA_ROW: usize = 3;
    /// Inclusive; the last data row is the TOTAL rollup.
    pub const LAST_DATA_ROW: usize = 11;

    pub const TOTAL_LABEL: &str = "TOTAL";
    /// Stray header repetition that shows up in the label column.
    pub const HEADER_LABEL: &str = "AREA";

    pub fn month_col(month: Month) -> usize {
        FIRST_MONTH_COL + month.index()
    }

    /// All twelve month columns, enero first.
    pub fn month_cols() -> [usize; 12] {
        let mut cols = [0; 12];
        for (i, c) in cols.iter_mut().enumerate() {
            *c = FIRST_MONTH_COL + i;
        }
        cols
    }

    /// Enero..junio, the audited half of the year.
    pub fn first_half_cols() -> [usize; 6] {
        let mut cols = [0; 6];
        for (i, c) in cols.iter_mut().enumerate() {
            *c = FIRST_MONTH_COL + i;
        }
        cols
    }
}

/// "PPTO": one row per cost center, enero..junio only.
pub mod ppto {
    use super::Month;

    pub const SHEET: &str = "PPTO";

    pub const MONEDA_COL: usize = 0;
    pub const CENTRO_COL: usize = 1;
    pub const DENOMINACION_COL: usize = 2;
    pub const FIRST_MONTH_COL: usize = 6;
    pub const ANNUAL_COL: usize = 12;

    pub const FIRST_DATA_ROW: usize = 6;

    /// Trailing rollup row, matched on the first column.
    pub const GRAND_TOTAL_LABEL: &str = "Total general";

    /// Only the first half of the year is present on this sheet.
    pub const MONTH_COUNT: usize = 6;

    pub fn month_col(month: Month) -> usize {
        FIRST_MONTH_COL + month.index()
    }

    pub fn month_cols() -> [usize; 6] {
        let mut cols = [0; 6];
        for (i, c) in cols.iter_mut().enumerate() {
            *c = FIRST_MONTH_COL + i;
        }
        cols
    }
}

/// "Cuentas": flat actuals, one row per account and month.
pub mod cuentas {
    pub const SHEET: &str = "Cuentas";

    pub const AREA_COL: usize = 1;
    pub const SUB_AREA_COL: usize = 2;
    pub const RESPONSABLE_COL: usize = 3;
    pub const CUENTA_COL: usize = 4;
    pub const DESCRIPCION_COL: usize = 5;
    pub const MERCA_COL: usize = 6;
    pub const MES_COL: usize = 9;
    pub const VALOR_COL: usize = 10;

    pub const FIRST_DATA_ROW: usize = 2;
}

/// "Data" and "Reclasificación de gastos": transaction dumps addressed
/// by header name on the first row rather than by fixed offsets.
pub mod data {
    pub const SHEET: &str = "Data";
    pub const RECLASIFICACION_SHEET: &str = "Reclasificación de gastos";

    pub const HEADER_ROW: usize = 0;

    pub const CENTRO: &str = "Centro de coste";
    pub const CLASE: &str = "Clase de coste";
    pub const DENOM_CLASE: &str = "Denom.clase de coste";
    pub const DOCUMENTO: &str = "Nº docum.refer.";
    pub const VALOR: &str = "Valor/Moneda objeto";
    pub const MONEDA: &str = "Moneda del objeto";
    pub const TEXTO: &str = "Texto de cabecera de documento";
    pub const DOCUMENTO_COMPRAS: &str = "Documento compras";
    pub const USUARIO: &str = "Usuario";
    pub const EJERCICIO: &str = "Ejercicio";
    pub const DENOMINACION: &str = "Denominación del objeto";
    pub const DESCRIP_CLASES: &str = "Descrip.clases coste";
    pub const VALOR_VARIABLE: &str = "Valor variable/MI";
    pub const MERCA: &str = "Merca";
    pub const FECHA: &str = "Fe.contabilización";
}
