//! End-to-end engine tests: aggregate → reconcile → classify over small
//! in-memory sources, mirroring the audits the CLI runs against real sheets.

use quetzal_recon::{
    aggregate_months, classify, classify_all, entity_total, reconcile, reconcile_all, summarize,
    CellData, Consistency, FlatRow, Totals,
};

fn row(label: &str, values: &[f64]) -> FlatRow {
    let mut cells = vec![CellData::Blank, CellData::Text(label.to_string())];
    cells.extend(values.iter().map(|v| CellData::Number(*v)));
    FlatRow::new(cells)
}

fn totals(pairs: &[(&str, f64)]) -> Totals {
    pairs.iter().map(|(e, v)| (e.to_string(), *v)).collect()
}

// Label at column 1, six month values at columns 2..=7 — the summary sheet
// shape.
const LABEL: usize = 1;
const MONTHS: [usize; 6] = [2, 3, 4, 5, 6, 7];

#[test]
fn matching_sources_classify_consistent() {
    // Source A: {"Sales": 100.0}, source B: {"Sales": 100.5}, tolerance 1.0.
    let a = totals(&[("Sales", 100.0)]);
    let b = totals(&[("Sales", 100.5)]);

    let results = reconcile_all(&a, &b);
    assert_eq!(results.len(), 1);
    assert!((results[0].difference - 0.5).abs() < 1e-12);
    assert_eq!(classify(&results[0], 1.0), Consistency::Consistent);
}

#[test]
fn absent_key_is_reportable_not_an_error() {
    // Source B has no "Sales" at all: compared as 0.0, inconsistent at
    // tolerance 1.0.
    let a = totals(&[("Sales", 100.0)]);
    let b = totals(&[]);

    let results = reconcile_all(&a, &b);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].difference, 100.0);
    assert_eq!(classify(&results[0], 1.0), Consistency::Inconsistent);
}

#[test]
fn rollup_row_never_double_counts() {
    let rows = vec![
        row("A", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
        row("TOTAL", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
    ];
    let recomputed = entity_total(&rows, LABEL, &MONTHS, &["TOTAL"]);
    assert_eq!(recomputed.get("A"), Some(21.0));
    assert_eq!(recomputed.len(), 1);
    assert_eq!(recomputed.grand_total(), 21.0);
}

#[test]
fn recomputed_total_reconciles_against_reported_rollup() {
    // A from-scratch recomputation of the per-area sums must agree with the
    // sheet's own TOTAL row when the sheet is internally consistent.
    let rows = vec![
        row("VENTAS", &[10.0, 20.0, 30.0, 0.0, 0.0, 0.0]),
        row("MARKETING", &[5.0, 5.0, 5.0, 5.0, 5.0, 5.0]),
        row("TOTAL", &[15.0, 25.0, 35.0, 5.0, 5.0, 5.0]),
    ];

    let per_area = entity_total(&rows, LABEL, &MONTHS, &["TOTAL"]);
    let reported = aggregate_months(&rows[2], &MONTHS);

    let mut recomputed = Totals::new();
    recomputed.add("TOTAL", per_area.grand_total());
    let mut sheet = Totals::new();
    sheet.add("TOTAL", reported);

    let result = reconcile(&recomputed, &sheet, "TOTAL");
    assert_eq!(result.difference, 0.0);
    assert_eq!(classify(&result, 1.0), Consistency::Consistent);
}

#[test]
fn union_ordering_left_first_then_right_extras() {
    let excel = totals(&[("VENTAS", 100.0), ("MARKETING", 50.0)]);
    let store = totals(&[("MARKETING", 50.0), ("OPERACIONES", 25.0)]);

    let keys: Vec<String> = reconcile_all(&excel, &store)
        .into_iter()
        .map(|r| r.entity)
        .collect();
    assert_eq!(keys, vec!["VENTAS", "MARKETING", "OPERACIONES"]);

    // No duplicates even when every key overlaps.
    let dup = reconcile_all(&excel, &excel);
    assert_eq!(dup.len(), 2);
}

#[test]
fn full_pipeline_summary_and_exit_signal() {
    let excel = totals(&[("A", 10.0), ("B", 20.0), ("C", 30.0)]);
    let store = totals(&[("A", 10.4), ("B", 0.0), ("D", 7.0)]);

    let lines = classify_all(&reconcile_all(&excel, &store), 1.0);
    let summary = summarize(&lines);

    assert_eq!(summary.total, 4); // A, B, C, D
    assert_eq!(summary.consistent, 1); // A within tolerance
    assert_eq!(summary.inconsistent, 3); // B, C (absent right), D (absent left)
    assert!(!summary.all_consistent());
}

#[test]
fn boundary_difference_equal_to_tolerance_fails() {
    let a = totals(&[("X", 10.0)]);
    let b = totals(&[("X", 9.0)]);
    let lines = classify_all(&reconcile_all(&a, &b), 1.0);
    assert_eq!(lines[0].status, Consistency::Inconsistent);
}
