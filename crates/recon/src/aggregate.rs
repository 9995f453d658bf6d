use crate::model::{FlatRow, Totals};

/// Sum a row's values at the given column positions.
///
/// Blank, missing and non-numeric cells contribute zero, so an all-empty
/// row sums to exactly 0.0. Never fails.
pub fn aggregate_months(row: &FlatRow, month_positions: &[usize]) -> f64 {
    month_positions.iter().map(|&pos| row.number_at(pos)).sum()
}

/// Group rows by the label at `label_position` and sum each group's values
/// at `value_positions`.
///
/// Rows with an empty label are skipped. Labels in `exclude_labels` are
/// skipped too — used to keep a sheet's own rollup row (e.g. "TOTAL") out
/// of a from-scratch recomputation.
pub fn entity_total(
    rows: &[FlatRow],
    label_position: usize,
    value_positions: &[usize],
    exclude_labels: &[&str],
) -> Totals {
    let mut totals = Totals::new();
    for row in rows {
        let label = row.label_at(label_position);
        if label.is_empty() || exclude_labels.contains(&label.as_str()) {
            continue;
        }
        totals.add(&label, aggregate_months(row, value_positions));
    }
    totals
}
