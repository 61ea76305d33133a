use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

// ASCII digits only: `\d` would also accept other Unicode decimal digits.
static INTEGER_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0|[1-9][0-9]*)$").expect("integer literal pattern is valid"));

/// Validates that `raw` is a plain integer literal within
/// [`roman::MIN`]`..=`[`roman::MAX`] and returns its value.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if `raw` carries a sign, leading zeros, whitespace
///   or any non-digit character.
/// - [`Error::OutOfRange`] if the literal is well-formed but outside the
///   domain. This includes literals too long to fit any machine integer.
pub fn validate_integer(raw: &str) -> Result<u16> {
    if !INTEGER_LITERAL.is_match(raw) {
        return Err(Error::InvalidInput);
    }

    match raw.parse::<u16>() {
        Ok(n) if (roman::MIN..=roman::MAX).contains(&n) => Ok(n),
        _ => Err(Error::OutOfRange),
    }
}

/// Validates both bounds independently, then requires `min < max`.
///
/// # Errors
///
/// Any error from [`validate_integer`] for `raw_min` (checked first) or
/// `raw_max`, then [`Error::InvalidRange`] if `min >= max`.
pub fn validate_range(raw_min: &str, raw_max: &str) -> Result<(u16, u16)> {
    let min = validate_integer(raw_min)?;
    let max = validate_integer(raw_max)?;

    if min >= max {
        return Err(Error::InvalidRange);
    }

    Ok((min, max))
}
