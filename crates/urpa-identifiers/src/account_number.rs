//! Bank account number validation
//!
//! Account numbers are written `[prefix-]number[/bank]`: an optional prefix
//! of up to 6 digits, a basic number of 2 to 10 digits and an optional 4
//! digit bank code. The prefix and the basic number are checked separately;
//! each digit is weighted by `2^i mod 11`, `i` counted from the rightmost
//! digit, and the weighted sum must be divisible by 11.

use std::ops::RangeInclusive;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::digits::{ascii_digits, weighted_sum_from_right};
use crate::error::{IdentifierError, Result};

lazy_static! {
    static ref ACCOUNT_NUMBER_PATTERN: Regex = Regex::new(
        r"^(?:(?P<prefix>[0-9]{1,6})-)?(?P<number>[0-9]{2,10})(?:/(?P<bank>[0-9]{4}))?$"
    )
    .unwrap();
}

/// `2^i mod 11` for i = 0..10, least significant digit first
const ACCOUNT_WEIGHTS: [u32; 10] = [1, 2, 4, 8, 5, 10, 9, 7, 3, 6];

const ACCOUNT_MODULUS: u32 = 11;

const PREFIX_LENGTH: RangeInclusive<usize> = 1..=6;
const NUMBER_LENGTH: RangeInclusive<usize> = 2..=10;

/// A bank account number with valid checksums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountNumber {
    pub prefix: Option<String>,
    pub number: String,
    pub bank_code: Option<String>,
}

impl AccountNumber {
    /// Parse and verify an account number.
    ///
    /// # Examples
    /// ```
    /// use urpa_identifiers::AccountNumber;
    /// let account = AccountNumber::parse("19-2235210247/0100").unwrap();
    /// assert_eq!(account.prefix.as_deref(), Some("19"));
    /// assert_eq!(account.bank_code.as_deref(), Some("0100"));
    /// ```
    pub fn parse(value: &str) -> Result<Self> {
        let caps = ACCOUNT_NUMBER_PATTERN.captures(value).ok_or_else(|| {
            IdentifierError::InvalidFormat(format!(
                "expected [prefix-]number[/bank], got '{value}'"
            ))
        })?;

        let prefix = caps.name("prefix").map(|m| m.as_str().to_string());
        let number = caps
            .name("number")
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| IdentifierError::InvalidFormat(value.to_string()))?;
        let bank_code = caps.name("bank").map(|m| m.as_str().to_string());

        if let Some(prefix) = &prefix {
            verify_prefix(prefix)?;
        }
        verify_number(&number)?;

        Ok(Self {
            prefix,
            number,
            bank_code,
        })
    }

    /// Canonical rendering, omitting absent parts.
    pub fn formatted(&self) -> String {
        let mut out = String::new();
        if let Some(prefix) = &self.prefix {
            out.push_str(prefix);
            out.push('-');
        }
        out.push_str(&self.number);
        if let Some(bank) = &self.bank_code {
            out.push('/');
            out.push_str(bank);
        }
        out
    }
}

/// Check whether a bank account number is valid.
///
/// # Examples
/// ```
/// use urpa_identifiers::validate_account_number;
/// assert!(validate_account_number("19-2235210247"));
/// assert!(validate_account_number("6007-0700103393/0800"));
/// assert!(!validate_account_number("1234567890"));
/// ```
pub fn validate_account_number(value: &str) -> bool {
    match AccountNumber::parse(value) {
        Ok(_) => true,
        Err(err) => {
            debug!("Account number '{}' not valid: {}", value, err);
            false
        }
    }
}

/// Check an account number given as separate prefix and basic number.
///
/// An empty `prefix` means the account has none. Both parts must be plain
/// digits; separators and bank codes are rejected.
pub fn is_account_number_valid(prefix: &str, number: &str) -> bool {
    let result = if prefix.is_empty() {
        Ok(())
    } else {
        verify_prefix(prefix)
    }
    .and_then(|_| verify_number(number));

    match result {
        Ok(()) => true,
        Err(err) => {
            debug!("Account number '{}-{}' not valid: {}", prefix, number, err);
            false
        }
    }
}

fn verify_prefix(prefix: &str) -> Result<()> {
    if !PREFIX_LENGTH.contains(&prefix.len()) {
        return Err(IdentifierError::InvalidLength {
            expected: "1 to 6 prefix digits".to_string(),
            actual: prefix.len(),
        });
    }
    verify_part(prefix)
}

fn verify_number(number: &str) -> Result<()> {
    if !NUMBER_LENGTH.contains(&number.len()) {
        return Err(IdentifierError::InvalidLength {
            expected: "2 to 10 digits".to_string(),
            actual: number.len(),
        });
    }
    if number.trim_start_matches('0').len() < 2 {
        return Err(IdentifierError::InvalidFormat(format!(
            "basic number '{number}' needs at least two significant digits"
        )));
    }
    verify_part(number)
}

fn verify_part(part: &str) -> Result<()> {
    let digits = ascii_digits(part).ok_or_else(|| IdentifierError::NonDigit(part.to_string()))?;
    let remainder = weighted_sum_from_right(&digits, &ACCOUNT_WEIGHTS) % ACCOUNT_MODULUS;
    if remainder != 0 {
        return Err(IdentifierError::ChecksumMismatch {
            expected: 0,
            actual: remainder,
        });
    }
    Ok(())
}
