use std::fmt;

use crate::error::LookupError;

pub const DNI_LENGTH: usize = 8;

/// A validated 8-digit national identity number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dni(String);

impl Dni {
    pub fn parse(input: &str) -> Result<Self, LookupError> {
        let digits = sanitize(input);
        // Extra digits are a typo, not a longer number to truncate.
        if digits.len() != DNI_LENGTH {
            return Err(LookupError::InvalidDni);
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Dni {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keeps the ASCII digits of free-text input.
pub fn sanitize(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}
