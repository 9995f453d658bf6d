use crate::model::{ReconciliationResult, Totals};

/// Compare one entity across two sources.
///
/// An entity absent from a source counts as 0.0 there — key-not-found is a
/// valid, reportable state, not an error.
pub fn reconcile(left: &Totals, right: &Totals, entity: &str) -> ReconciliationResult {
    let l = left.get(entity).unwrap_or(0.0);
    let r = right.get(entity).unwrap_or(0.0);
    ReconciliationResult {
        entity: entity.to_string(),
        left: l,
        right: r,
        difference: (l - r).abs(),
    }
}

/// Reconcile the union of both sources' entities, each independently.
///
/// Ordering: `left`'s entities in insertion order, then entities unique to
/// `right` in its insertion order. No duplicates.
pub fn reconcile_all(left: &Totals, right: &Totals) -> Vec<ReconciliationResult> {
    let mut results: Vec<ReconciliationResult> = left
        .entities()
        .map(|entity| reconcile(left, right, entity))
        .collect();
    for entity in right.entities() {
        if !left.contains(entity) {
            results.push(reconcile(left, right, entity));
        }
    }
    results
}
