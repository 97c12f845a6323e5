//! Weight semirings understood by the external toolkit.

use std::fmt;

/// Weight algebra of a compiled automaton.
///
/// Both semirings store costs as negative natural logs; they differ only in
/// how the toolkit sums alternative paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Semiring {
    /// Log-additive semiring (`log` arc type).
    #[default]
    Log,
    /// Tropical semiring (`standard` arc type).
    Tropical,
}

impl Semiring {
    /// Arc type name passed to `--arc_type`.
    pub fn arc_type(self) -> &'static str {
        match self {
            Semiring::Log => "log",
            Semiring::Tropical => "standard",
        }
    }

    /// Parse a long-form semiring name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "log" => Some(Semiring::Log),
            "tropical" | "standard" | "trop" => Some(Semiring::Tropical),
            _ => None,
        }
    }

    /// Single-letter option code used in operator suffixes (`det_l`).
    pub fn letter(self) -> char {
        match self {
            Semiring::Log => 'l',
            Semiring::Tropical => 't',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'l' => Some(Semiring::Log),
            't' => Some(Semiring::Tropical),
            _ => None,
        }
    }
}

impl fmt::Display for Semiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semiring::Log => f.write_str("log"),
            Semiring::Tropical => f.write_str("tropical"),
        }
    }
}

/// Convert a base-10 log probability into a natural-log cost (`−ln(10)·x`).
#[inline]
pub fn log10_to_cost(log10: f64) -> f64 {
    -std::f64::consts::LN_10 * log10
}
