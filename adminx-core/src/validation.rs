//! Input validation for user-supplied strings.
//!
//! Two flavours share the same rules: [`validate_input_fast`] answers with a
//! terse `(valid, message)` pair for the operation table, while
//! [`explain_input`] names the rule that rejected the input.
//!
//! The fast validator rejects any single character from [`DANGEROUS_CHARS`].
//! The explaining validator looks for the SQL-flavoured
//! [`DANGEROUS_PATTERNS`] instead, so a lone `-` or `/` passes it.

use thiserror::Error;

/// Characters that make an input invalid.
pub const DANGEROUS_CHARS: [char; 6] = ['\'', ';', '"', '-', '/', '*'];

/// Substrings rejected by [`explain_input`], checked in this order.
pub const DANGEROUS_PATTERNS: [&str; 6] = ["'", "\"", ";", "--", "/*", "*/"];

/// Message returned by the fast validator for any rejected input.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input";

/// Result of [`validate_input_fast`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    /// Empty when valid.
    pub message: String,
}

impl ValidationOutcome {
    fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    fn invalid() -> Self {
        Self {
            is_valid: false,
            message: INVALID_INPUT_MESSAGE.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputRejection {
    #[error("Input is empty")]
    Empty,
    #[error("Length must be between {min} and {max}")]
    Length { min: i64, max: i64 },
    #[error("Dangerous character detected: {0}")]
    DangerousPattern(&'static str),
}

/// Valid iff the length lies in `[min_len, max_len]` and no character from
/// [`DANGEROUS_CHARS`] appears. `min_len > max_len` simply rejects everything.
///
/// Length is counted in Unicode characters, not UTF-8 bytes: `"äöüß"` has
/// length 4 here, where a byte-counting (`strlen`) validator sees 8.
pub fn validate_input_fast(input: &str, min_len: i64, max_len: i64) -> ValidationOutcome {
    if length_in_range(input, min_len, max_len) && !input.contains(DANGEROUS_CHARS) {
        ValidationOutcome::valid()
    } else {
        ValidationOutcome::invalid()
    }
}

/// Emptiness, length and [`DANGEROUS_PATTERNS`] checks, reporting the first
/// rule that fails.
pub fn explain_input(input: &str, min_len: i64, max_len: i64) -> Result<(), InputRejection> {
    if input.is_empty() {
        return Err(InputRejection::Empty);
    }

    if !length_in_range(input, min_len, max_len) {
        return Err(InputRejection::Length {
            min: min_len,
            max: max_len,
        });
    }

    if let Some(pattern) = DANGEROUS_PATTERNS.into_iter().find(|p| input.contains(p)) {
        return Err(InputRejection::DangerousPattern(pattern));
    }

    Ok(())
}

fn length_in_range(input: &str, min_len: i64, max_len: i64) -> bool {
    let len = i64::try_from(input.chars().count()).unwrap_or(i64::MAX);
    len >= min_len && len <= max_len
}
