//! Resident codes and the sequential code generator.
//!
//! Codes are the human-facing identifiers (`BN` plus a zero-padded numeric
//! suffix) shown in the console, distinct from the internal record key. The
//! generator is a pure function of the codes currently in the store and is
//! recomputed at every creation so batched creations each see the latest
//! maximum.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix shared by every resident code.
pub const CODE_PREFIX: &str = "BN";

/// Minimum number of digits in the numeric suffix.
pub const CODE_SUFFIX_DIGITS: usize = 5;

/// Error returned when a string is not a well-formed resident code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a valid resident code (expected BN followed by at least 5 digits)")]
pub struct CodeParseError {
    /// The rejected input.
    pub input: String,
}

/// Human-facing sequential resident identifier, e.g. `BN00001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResidentCode(String);

impl ResidentCode {
    /// Validate and construct a code from its textual form.
    pub fn new(raw: impl Into<String>) -> Result<Self, CodeParseError> {
        let raw = raw.into();
        let digits = raw.strip_prefix(CODE_PREFIX).unwrap_or_default();
        if digits.len() >= CODE_SUFFIX_DIGITS && digits.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(raw))
        } else {
            Err(CodeParseError { input: raw })
        }
    }

    /// Build a code from a numeric suffix, zero-padding to five digits.
    pub fn from_number(number: u64) -> Self {
        Self(format!("{CODE_PREFIX}{number:05}"))
    }

    /// Borrow the textual form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Numeric suffix of the code.
    pub fn number(&self) -> u64 {
        numeric_suffix(&self.0)
    }
}

impl std::fmt::Display for ResidentCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ResidentCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<ResidentCode> for String {
    fn from(value: ResidentCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for ResidentCode {
    type Error = CodeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Numeric suffix of a raw code string; malformed entries contribute zero.
fn numeric_suffix(raw: &str) -> u64 {
    raw.strip_prefix(CODE_PREFIX)
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

/// Derive the next sequential code from the codes currently in the store.
///
/// Returns `BN` plus the zero-padded successor of the maximum existing
/// suffix. An empty store yields `BN00001`. Deleting the highest-numbered
/// record lets its number be reissued; lower numbers are never reused while
/// an equal or higher suffix remains.
///
/// # Examples
/// ```
/// use backend::domain::code::next_code;
///
/// assert_eq!(next_code(["BN00001", "BN00002"]).as_str(), "BN00003");
/// assert_eq!(next_code([]).as_str(), "BN00001");
/// ```
pub fn next_code<'a>(existing: impl IntoIterator<Item = &'a str>) -> ResidentCode {
    let max = existing
        .into_iter()
        .map(numeric_suffix)
        .max()
        .unwrap_or(0);
    ResidentCode::from_number(max + 1)
}
