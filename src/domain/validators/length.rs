//! Length-only postal code check.

use super::PostalCodeValidator;

/// Accepts any input whose byte length is exactly 8.
///
/// Matches the minimal check used by the public edge of the service; no
/// attempt is made to check that the characters are digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthValidator;

const CEP_LENGTH: usize = 8;

impl PostalCodeValidator for LengthValidator {
    fn is_valid(&self, input: &str) -> bool {
        input.len() == CEP_LENGTH
    }
}
