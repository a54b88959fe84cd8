//! Brazilian CEP validator.

use super::PostalCodeValidator;
use regex::Regex;
use std::sync::LazyLock;

/// `NNNNNNNN` or `NNNNN-NNN`, ASCII digits only.
static CEP_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}-?[0-9]{3}$").unwrap());

/// CEP ranges per state, by the first three digits (inclusive).
///
/// Some states own more than one range.
const STATE_RANGES: &[(&str, u16, u16)] = &[
    ("SP", 10, 199),
    ("RJ", 200, 289),
    ("ES", 290, 299),
    ("MG", 300, 399),
    ("BA", 400, 489),
    ("SE", 490, 499),
    ("PE", 500, 569),
    ("AL", 570, 579),
    ("PB", 580, 589),
    ("RN", 590, 599),
    ("CE", 600, 639),
    ("PI", 640, 649),
    ("MA", 650, 659),
    ("PA", 660, 688),
    ("AP", 689, 689),
    ("AM", 690, 692),
    ("RR", 693, 693),
    ("AM", 694, 698),
    ("AC", 699, 699),
    ("DF", 700, 727),
    ("GO", 728, 729),
    ("DF", 730, 736),
    ("GO", 737, 767),
    ("RO", 768, 769),
    ("TO", 770, 779),
    ("MT", 780, 788),
    ("MS", 790, 799),
    ("PR", 800, 879),
    ("SC", 880, 899),
    ("RS", 900, 999),
];

/// Two-letter codes of every state with a CEP range.
pub const STATE_CODES: &[&str] = &[
    "AC", "AL", "AM", "AP", "BA", "CE", "DF", "ES", "GO", "MA", "MG", "MS", "MT", "PA", "PB",
    "PE", "PI", "PR", "RJ", "RN", "RO", "RR", "RS", "SC", "SE", "SP", "TO",
];

/// Validates the CEP format and that the code falls inside a state's range.
///
/// Optionally restricted to a subset of states, in which case codes from
/// other states are rejected.
#[derive(Debug, Clone, Default)]
pub struct NationalCepValidator {
    states: Vec<String>,
}

impl NationalCepValidator {
    /// Accepts codes from every state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts only codes belonging to `states` (two-letter codes, any case).
    pub fn restricted_to(states: &[String]) -> Self {
        Self {
            states: states.iter().map(|s| s.trim().to_ascii_uppercase()).collect(),
        }
    }

    /// Returns the state a CEP belongs to, or `None` when the format is
    /// wrong or the prefix is unassigned.
    pub fn state_of(cep: &str) -> Option<&'static str> {
        if !CEP_FORMAT.is_match(cep) {
            return None;
        }

        let prefix: u16 = cep[..3].parse().ok()?;

        STATE_RANGES
            .iter()
            .find(|(_, start, end)| (*start..=*end).contains(&prefix))
            .map(|(state, _, _)| *state)
    }

    /// Returns `true` if `code` is a known state code.
    pub fn is_known_state(code: &str) -> bool {
        STATE_CODES.contains(&code.trim().to_ascii_uppercase().as_str())
    }
}

impl PostalCodeValidator for NationalCepValidator {
    fn is_valid(&self, input: &str) -> bool {
        match Self::state_of(input) {
            Some(state) => self.states.is_empty() || self.states.iter().any(|s| s == state),
            None => false,
        }
    }
}
