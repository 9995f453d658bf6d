use serde::Serialize;

use crate::classify::{classify, Consistency};
use crate::model::ReconciliationResult;

/// One classified reconciliation, ready to print.
///
/// The JSON shape is a contract for `--json` output: entity, both values,
/// their absolute difference and the classification.
#[derive(Debug, Clone, Serialize)]
pub struct ReportLine {
    pub entity: String,
    pub left: f64,
    pub right: f64,
    pub difference: f64,
    pub status: Consistency,
}

impl ReportLine {
    /// Human-readable pass/fail line. `left_name`/`right_name` label the
    /// two sources (e.g. "excel", "store").
    pub fn human(&self, left_name: &str, right_name: &str) -> String {
        let tag = match self.status {
            Consistency::Consistent => "ok      ",
            Consistency::Inconsistent => "MISMATCH",
        };
        format!(
            "{tag} {}: {left_name}={:.2} {right_name}={:.2} diff={:.2}",
            self.entity, self.left, self.right, self.difference,
        )
    }

    /// One JSON line, fields per the report contract.
    pub fn json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Classify every result against `tolerance`, preserving order.
pub fn classify_all(results: &[ReconciliationResult], tolerance: f64) -> Vec<ReportLine> {
    results
        .iter()
        .map(|r| ReportLine {
            entity: r.entity.clone(),
            left: r.left,
            right: r.right,
            difference: r.difference,
            status: classify(r, tolerance),
        })
        .collect()
}

/// Counts for the end-of-run summary.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub consistent: usize,
    pub inconsistent: usize,
}

impl ReportSummary {
    pub fn all_consistent(&self) -> bool {
        self.inconsistent == 0
    }
}

pub fn summarize(lines: &[ReportLine]) -> ReportSummary {
    let inconsistent = lines
        .iter()
        .filter(|l| l.status == Consistency::Inconsistent)
        .count();
    ReportSummary {
        total: lines.len(),
        consistent: lines.len() - inconsistent,
        inconsistent,
    }
}
