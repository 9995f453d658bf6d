use crate::month::Month;

/// One organizational entity (an area or a cost center) for one reporting
/// period: twelve month values, an independently stored annual total, and an
/// optional freeze adjustment.
///
/// The annual total is deliberately not derived from the month values: the
/// whole point of the audit is to detect when the two disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRow {
    pub entity: String,
    pub months: [f64; 12],
    pub annual_total: f64,
    pub freeze: Option<f64>,
}

impl BudgetRow {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            months: [0.0; 12],
            annual_total: 0.0,
            freeze: None,
        }
    }

    pub fn month(&self, m: Month) -> f64 {
        self.months[m.index()]
    }

    pub fn set_month(&mut self, m: Month, value: f64) {
        self.months[m.index()] = value;
    }

    /// Sum of the Ene-Jun reporting period.
    pub fn first_half_sum(&self) -> f64 {
        Month::FIRST_HALF.iter().map(|m| self.month(*m)).sum()
    }

    /// Sum of all twelve months. Should approximate `annual_total`; the
    /// audit exists to flag the rows where it does not.
    pub fn full_year_sum(&self) -> f64 {
        self.months.iter().sum()
    }
}
