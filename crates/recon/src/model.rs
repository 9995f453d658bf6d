use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One cell of a positionally indexed row lifted out of a source sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellData {
    Blank,
    Number(f64),
    Text(String),
}

/// A row addressed by zero-based position, as the aggregator sees it.
///
/// Missing and non-numeric cells are already resolved by the extraction
/// stage: whatever reaches this type is arithmetic-safe, so numeric access
/// degrades to zero and label access to the empty string.
#[derive(Debug, Clone, Default)]
pub struct FlatRow {
    cells: Vec<CellData>,
}

impl FlatRow {
    pub fn new(cells: Vec<CellData>) -> Self {
        Self { cells }
    }

    /// Value at `pos` for arithmetic. Blank, missing and textual cells are
    /// zero.
    pub fn number_at(&self, pos: usize) -> f64 {
        match self.cells.get(pos) {
            Some(CellData::Number(n)) => *n,
            _ => 0.0,
        }
    }

    /// Value at `pos` as a label. Blank and missing cells are the empty
    /// string; numbers render with their shortest form.
    pub fn label_at(&self, pos: usize) -> String {
        match self.cells.get(pos) {
            Some(CellData::Text(s)) => s.trim().to_string(),
            Some(CellData::Number(n)) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            _ => String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Aggregation output / reconciliation input
// ---------------------------------------------------------------------------

/// Per-entity totals from one source, in insertion order.
///
/// Insertion order matters: `reconcile_all` reports the left source's
/// entities first, in the order they were aggregated, then any entities
/// unique to the right source.
#[derive(Debug, Clone, Default)]
pub struct Totals {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl Totals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `entity`, creating it at the end if new.
    pub fn add(&mut self, entity: &str, amount: f64) {
        match self.index.get(entity) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(entity.to_string(), self.entries.len());
                self.entries.push((entity.to_string(), amount));
            }
        }
    }

    pub fn get(&self, entity: &str) -> Option<f64> {
        self.index.get(entity).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.index.contains_key(entity)
    }

    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(e, _)| e.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(e, v)| (e.as_str(), *v))
    }

    /// Sum over every entity.
    pub fn grand_total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, f64)> for Totals {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut totals = Totals::new();
        for (entity, amount) in iter {
            totals.add(&entity, amount);
        }
        totals
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// One entity compared across two sources. Transient: computed and reported
/// within a single run, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationResult {
    pub entity: String,
    pub left: f64,
    pub right: f64,
    pub difference: f64,
}
