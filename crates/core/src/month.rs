use serde::{Deserialize, Serialize};

/// One of the twelve fixed lower-case month tokens used on the wire.
///
/// The token set is part of the extract/store contract: the reconciliation
/// and reporting stages filter by these exact strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    Enero,
    Febrero,
    Marzo,
    Abril,
    Mayo,
    Junio,
    Julio,
    Agosto,
    Septiembre,
    Octubre,
    Noviembre,
    Diciembre,
}

impl Month {
    /// Calendar order, January first.
    pub const ALL: [Month; 12] = [
        Month::Enero,
        Month::Febrero,
        Month::Marzo,
        Month::Abril,
        Month::Mayo,
        Month::Junio,
        Month::Julio,
        Month::Agosto,
        Month::Septiembre,
        Month::Octubre,
        Month::Noviembre,
        Month::Diciembre,
    ];

    /// The "Ene-Jun" first-half reporting period.
    pub const FIRST_HALF: [Month; 6] = [
        Month::Enero,
        Month::Febrero,
        Month::Marzo,
        Month::Abril,
        Month::Mayo,
        Month::Junio,
    ];

    /// Zero-based calendar index (enero = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// 1-based calendar number (enero = 1).
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Wire token, always lower-case.
    pub fn token(self) -> &'static str {
        match self {
            Month::Enero => "enero",
            Month::Febrero => "febrero",
            Month::Marzo => "marzo",
            Month::Abril => "abril",
            Month::Mayo => "mayo",
            Month::Junio => "junio",
            Month::Julio => "julio",
            Month::Agosto => "agosto",
            Month::Septiembre => "septiembre",
            Month::Octubre => "octubre",
            Month::Noviembre => "noviembre",
            Month::Diciembre => "diciembre",
        }
    }

    /// Parse a token, tolerating surrounding whitespace and upper case
    /// (sheet labels are hand-typed).
    pub fn from_token(s: &str) -> Option<Month> {
        let token = s.trim().to_lowercase();
        Month::ALL.iter().copied().find(|m| m.token() == token)
    }

    /// Month for a 1-based calendar number (1 = enero).
    pub fn from_number(n: u32) -> Option<Month> {
        Month::ALL.get(n.checked_sub(1)? as usize).copied()
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_lowercase_and_distinct() {
        let mut seen = std::collections::HashSet::new();
        for m in Month::ALL {
            assert_eq!(m.token(), m.token().to_lowercase());
            assert!(seen.insert(m.token()));
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn first_half_is_enero_through_junio() {
        let tokens: Vec<&str> = Month::FIRST_HALF.iter().map(|m| m.token()).collect();
        assert_eq!(
            tokens,
            ["enero", "febrero", "marzo", "abril", "mayo", "junio"]
        );
    }

    #[test]
    fn from_token_tolerates_case_and_whitespace() {
        assert_eq!(Month::from_token(" Enero "), Some(Month::Enero));
        assert_eq!(Month::from_token("DICIEMBRE"), Some(Month::Diciembre));
        assert_eq!(Month::from_token("january"), None);
    }

    #[test]
    fn number_round_trips() {
        for m in Month::ALL {
            assert_eq!(Month::from_number(m.number()), Some(m));
        }
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }
}
