use serde::Serialize;

use crate::model::ReconciliationResult;

/// Outcome of comparing a difference against the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Consistency {
    Consistent,
    Inconsistent,
}

impl std::fmt::Display for Consistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Consistent => write!(f, "consistent"),
            Self::Inconsistent => write!(f, "inconsistent"),
        }
    }
}

/// `Consistent` iff `difference < tolerance`, strictly. A difference equal
/// to the tolerance is inconsistent. Pure; presentation is elsewhere.
pub fn classify(result: &ReconciliationResult, tolerance: f64) -> Consistency {
    if result.difference < tolerance {
        Consistency::Consistent
    } else {
        Consistency::Inconsistent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(difference: f64) -> ReconciliationResult {
        ReconciliationResult {
            entity: "X".into(),
            left: 0.0,
            right: difference,
            difference,
        }
    }

    #[test]
    fn strictly_below_tolerance_is_consistent() {
        assert_eq!(classify(&result(0.999), 1.0), Consistency::Consistent);
        assert_eq!(classify(&result(0.0), 1.0), Consistency::Consistent);
    }

    #[test]
    fn equal_to_tolerance_is_inconsistent() {
        assert_eq!(classify(&result(1.0), 1.0), Consistency::Inconsistent);
    }

    #[test]
    fn above_tolerance_is_inconsistent() {
        assert_eq!(classify(&result(100.0), 1.0), Consistency::Inconsistent);
    }
}
