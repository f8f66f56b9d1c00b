//! Input validation for threshold flags
//!
//! Threshold values are checked before the firewall is touched, so a typo in
//! a check definition reports UNKNOWN naming the flag rather than a
//! misleading state verdict.

use crate::core::error::{Error, Result};

/// Parses a `-w`/`-c` value as a non-negative integer.
///
/// Follows `strtonum(3)` over the range `0..=u64::MAX`: leading whitespace
/// and a leading `+` are accepted, negative numbers are `too small`, values
/// past `u64::MAX` are `too large`, everything else is `invalid`.
///
/// # Examples
///
/// ```
/// use check_pf::validators::parse_threshold;
///
/// assert_eq!(parse_threshold('w', "8000").unwrap(), 8000);
///
/// let err = parse_threshold('c', "lots").unwrap_err();
/// assert_eq!(err.to_string(), "-c is invalid: lots");
/// ```
///
/// # Errors
///
/// Returns `Error::InvalidThreshold` carrying the flag, reason and raw value.
pub fn parse_threshold(flag: char, raw: &str) -> Result<u64> {
    let reject = |reason: &'static str| Error::InvalidThreshold {
        flag,
        reason,
        value: raw.to_string(),
    };

    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(reject("invalid"));
    }

    if negative {
        // "-0" is still zero
        return if digits.bytes().all(|b| b == b'0') {
            Ok(0)
        } else {
            Err(reject("too small"))
        };
    }

    digits.parse::<u64>().map_err(|_| reject("too large"))
}
