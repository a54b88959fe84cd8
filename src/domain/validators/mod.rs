//! Postal code validation capability.
//!
//! The orchestration only needs a yes/no answer before any network call.
//! Two interchangeable implementations are provided:
//!
//! - [`LengthValidator`] - accepts any input exactly 8 bytes long
//! - [`NationalCepValidator`] - checks the CEP format and that the prefix
//!   belongs to a Brazilian state's range
//!
//! Which one is used is decided by configuration (see [`ValidatorKind`]).

mod length;
mod national;

pub use length::LengthValidator;
pub use national::{NationalCepValidator, STATE_CODES};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Checks whether an input looks like a postal code.
///
/// Implementations must be pure: no I/O and no side effects.
#[cfg_attr(test, mockall::automock)]
pub trait PostalCodeValidator: Send + Sync {
    fn is_valid(&self, input: &str) -> bool;
}

/// Selects the validator implementation at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidatorKind {
    /// [`LengthValidator`]
    Length,
    /// [`NationalCepValidator`]
    #[default]
    National,
}

impl ValidatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::National => "national",
        }
    }

    /// Builds the validator this kind stands for.
    ///
    /// `states` restricts the national validator to the given state codes;
    /// it is ignored by the length validator.
    pub fn build(&self, states: &[String]) -> Arc<dyn PostalCodeValidator> {
        match self {
            Self::Length => Arc::new(LengthValidator),
            Self::National if states.is_empty() => Arc::new(NationalCepValidator::new()),
            Self::National => Arc::new(NationalCepValidator::restricted_to(states)),
        }
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidatorKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "length" => Ok(Self::Length),
            "national" => Ok(Self::National),
            _ => anyhow::bail!(
                "Unknown CEP validator '{value}'. Supported validators: length, national."
            ),
        }
    }
}
