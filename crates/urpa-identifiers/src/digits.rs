//! Digit parsing and weighted sums shared by the validators

/// Digit values of an all-ASCII-digit string.
///
/// Returns `None` for empty input or anything outside `0-9`. Unicode digits
/// (e.g. Arabic-Indic) are rejected.
pub(crate) fn ascii_digits(value: &str) -> Option<Vec<u32>> {
    if !is_ascii_digits(value) {
        return None;
    }
    Some(value.bytes().map(|b| u32::from(b - b'0')).collect())
}

/// Whether `value` is non-empty and made of `0-9` only.
pub(crate) fn is_ascii_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Sum of `digit * weight`, pairing digits and weights left to right.
pub(crate) fn weighted_sum(digits: &[u32], weights: &[u32]) -> u32 {
    digits.iter().zip(weights).map(|(d, w)| d * w).sum()
}

/// Sum of `digit * weight`, starting at the least significant digit and
/// cycling through `weights`.
pub(crate) fn weighted_sum_from_right(digits: &[u32], weights: &[u32]) -> u32 {
    digits
        .iter()
        .rev()
        .zip(weights.iter().cycle())
        .map(|(d, w)| d * w)
        .sum()
}

/// Numeric value of an all-digit string. Caller guarantees the shape.
pub(crate) fn digits_value(value: &str) -> u64 {
    value
        .bytes()
        .fold(0u64, |acc, b| acc * 10 + u64::from(b - b'0'))
}
