//! Turns raw workbook sheets into the normalized record collections.
//!
//! The layout contract lives in [`layout`]; each sheet module reads its
//! sheet against that contract and produces typed rows plus the wire
//! records the document store and CSV exports carry.

mod error;
pub mod layout;
mod table;

pub mod cuentas;
pub mod ppto;
pub mod resumen;
pub mod transacciones;

pub use error::ExtractError;
pub use table::{flat_row, number, row_is_blank};

/// Stamp attached to every extracted record.
#[derive(Debug, Clone)]
pub struct Provenance {
    pub year: i32,
    pub source: String,
    pub created_at: String,
}

impl Provenance {
    /// Stamps records with the current wall-clock time and the workbook
    /// file name as source.
    pub fn now(year: i32, source: impl Into<String>) -> Self {
        Provenance {
            year,
            source: source.into(),
            created_at: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        }
    }

    pub fn at(year: i32, source: impl Into<String>, created_at: impl Into<String>) -> Self {
        Provenance {
            year,
            source: source.into(),
            created_at: created_at.into(),
        }
    }
}
