//! Business registration number validation
//!
//! An 8 digit number whose last digit is a modulus-11 check digit over the
//! first seven, weighted 8 down to 2.

use tracing::debug;

use crate::digits::{ascii_digits, is_ascii_digits, weighted_sum};
use crate::error::{IdentifierError, Result};

pub const BUSINESS_REGISTRATION_LENGTH: usize = 8;

/// Shortest number accepted for left padding
const MIN_JUSTIFY_LENGTH: usize = 4;

const BUSINESS_REGISTRATION_WEIGHTS: [u32; 7] = [8, 7, 6, 5, 4, 3, 2];

/// Check digit indexed by `weighted sum mod 11`
const CHECK_DIGIT_BY_REMAINDER: [u32; 11] = [1, 0, 9, 8, 7, 6, 5, 4, 3, 2, 1];

/// Check digit for the first seven digits of a business registration number.
///
/// Returns `None` unless `first_seven` is exactly 7 ASCII digits.
pub fn business_registration_check_digit(first_seven: &str) -> Option<u32> {
    if first_seven.len() != BUSINESS_REGISTRATION_LENGTH - 1 {
        return None;
    }
    let digits = ascii_digits(first_seven)?;
    let remainder = weighted_sum(&digits, &BUSINESS_REGISTRATION_WEIGHTS) % 11;
    Some(CHECK_DIGIT_BY_REMAINDER[remainder as usize])
}

/// Check whether a business registration number is valid.
///
/// The input must be exactly 8 digits; shorter numbers can be padded with
/// [`justify_business_registration_number`] first.
///
/// # Examples
/// ```
/// use urpa_identifiers::validate_business_registration_number;
/// assert!(validate_business_registration_number("26868644"));
/// assert!(!validate_business_registration_number("26868643"));
/// assert!(!validate_business_registration_number("885045"));
/// ```
pub fn validate_business_registration_number(value: &str) -> bool {
    if value.len() != BUSINESS_REGISTRATION_LENGTH || !is_ascii_digits(value) {
        debug!("Business registration number '{}' has invalid shape", value);
        return false;
    }

    let (stem, check) = value.split_at(BUSINESS_REGISTRATION_LENGTH - 1);
    let expected = business_registration_check_digit(stem);
    let actual = check.bytes().next().map(|b| u32::from(b - b'0'));

    if expected != actual {
        debug!(
            "Business registration number '{}' has wrong check digit, expected {:?}",
            value, expected
        );
        return false;
    }
    true
}

/// Left-pad a 4 to 8 digit business registration number with `fill`
/// (`123456` -> `00123456`).
pub fn justify_business_registration_number(value: &str, fill: char) -> Result<String> {
    if !fill.is_ascii_digit() {
        return Err(IdentifierError::InvalidArgument(format!(
            "fill char must be a single digit, got '{fill}'"
        )));
    }
    if !is_ascii_digits(value)
        || !(MIN_JUSTIFY_LENGTH..=BUSINESS_REGISTRATION_LENGTH).contains(&value.len())
    {
        return Err(IdentifierError::InvalidArgument(format!(
            "business registration number must be 4 to 8 digits, got '{value}'"
        )));
    }

    let mut justified: String = std::iter::repeat(fill)
        .take(BUSINESS_REGISTRATION_LENGTH - value.len())
        .collect();
    justified.push_str(value);
    Ok(justified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_digit_regular_remainder() {
        // 2*8 + 6*7 + 8*6 + 6*5 + 8*4 + 6*3 + 4*2 = 194, 194 mod 11 = 7
        assert_eq!(business_registration_check_digit("2686864"), Some(4));
    }

    #[test]
    fn check_digit_exception_table() {
        // remainder 0
        assert_eq!(business_registration_check_digit("0000014"), Some(1));
        assert_eq!(business_registration_check_digit("0000000"), Some(1));
        // remainder 1
        assert_eq!(business_registration_check_digit("0000006"), Some(0));
        assert_eq!(business_registration_check_digit("6482456"), Some(0));
    }

    #[test]
    fn check_digit_rejects_bad_stems() {
        assert_eq!(business_registration_check_digit("268686"), None);
        assert_eq!(business_registration_check_digit("26868644"), None);
        assert_eq!(business_registration_check_digit("2686a64"), None);
    }

    #[test]
    fn justify_pads_left() {
        assert_eq!(justify_business_registration_number("1234", '0').unwrap(), "00001234");
        assert_eq!(justify_business_registration_number("1234", '1').unwrap(), "11111234");
        assert_eq!(
            justify_business_registration_number("12345678", '0').unwrap(),
            "12345678"
        );
    }

    #[test]
    fn justify_rejects_invalid_arguments() {
        for value in ["12", "123456789", "1234a", ""] {
            assert!(matches!(
                justify_business_registration_number(value, '0'),
                Err(IdentifierError::InvalidArgument(_))
            ));
        }
        assert!(justify_business_registration_number("1234", 'a').is_err());
    }
}
