//! `quetzal-io` — file and store I/O for the budget audit pipeline.
//!
//! Three concerns, one crate: reading xlsx workbooks into positional sheet
//! tables, writing normalized CSV extracts, and a collection-addressed
//! document store backed by SQLite.

pub mod csv;
pub mod error;
pub mod store;
pub mod xlsx;

pub use csv::write_records;
pub use error::IoError;
pub use store::{doc_f64, doc_str, DocumentStore, Filter, SqliteStore};
pub use xlsx::{BudgetWorkbook, Cell, SheetTable};
