//! `quetzal-recon` — budget reconciliation engine.
//!
//! Pure engine crate: receives positionally indexed rows or pre-computed
//! per-entity totals, returns reconciliation results and classifications.
//! No CLI or IO dependencies.
//!
//! The pipeline is stateless and single-pass:
//! aggregate → reconcile → classify → report.

pub mod aggregate;
pub mod classify;
pub mod model;
pub mod reconcile;
pub mod report;

pub use aggregate::{aggregate_months, entity_total};
pub use classify::{classify, Consistency};
pub use model::{CellData, FlatRow, ReconciliationResult, Totals};
pub use reconcile::{reconcile, reconcile_all};
pub use report::{classify_all, summarize, ReportLine, ReportSummary};
