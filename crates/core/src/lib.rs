//! `quetzal-core` — shared domain types for the budget audit pipeline.
//!
//! Pure types crate: month tokens, budget rows, wire-contract records.
//! No IO dependencies.

pub mod month;
pub mod records;
pub mod row;

pub use month::Month;
pub use records::{CuentaRecord, PptoRecord, ResumenRecord, TransaccionRecord};
pub use row::BudgetRow;

use serde::{Deserialize, Serialize};

/// How numeric extraction treats a cell that is not a number.
///
/// Zero-filling a type-mismatched cell hides real data problems, so
/// `FailFast` is the default and `ZeroFill` is opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellPolicy {
    /// Non-numeric cell in a numeric position is a typed error.
    #[default]
    FailFast,
    /// Non-numeric cell in a numeric position becomes 0.0 (legacy behavior).
    ZeroFill,
}
