use crate::error::{ResolveError, Result};
use std::fmt;
use std::str::FromStr;

pub const CODE_LEN: usize = 8;

/// A normalized postal code: exactly eight ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(String);

impl Code {
    /// Strip surrounding whitespace and the `-`, `.` and space separators,
    /// then require exactly eight digits.
    pub fn parse(raw: &str) -> Result<Self> {
        let digits: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '.' | ' '))
            .collect();

        if digits.is_empty() {
            return Err(ResolveError::InvalidInput("code must not be empty".into()));
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(ResolveError::InvalidInput(format!(
                "code {raw:?} contains non-digit {bad:?}"
            )));
        }
        if digits.len() != CODE_LEN {
            return Err(ResolveError::InvalidInput(format!(
                "code must have {CODE_LEN} digits, got {} in {digits:?}",
                digits.len()
            )));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `NNNNN-NNN`, the way codes are usually written.
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl FromStr for Code {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
