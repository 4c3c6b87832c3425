//! Personal identification number validation
//!
//! Numbers have the shape `YYMMDD/XXXX` (issued since 1954) or `YYMMDD/XXX`
//! (until the end of 1953). The separator is optional. The month field also
//! carries the holder's sex:
//!
//! | offset | sex    | note                                   |
//! |--------|--------|----------------------------------------|
//! | +0     | male   |                                        |
//! | +50    | female |                                        |
//! | +20    | male   | daily serial range exhausted (2004+)   |
//! | +70    | female | daily serial range exhausted (2004+)   |
//!
//! Ten digit numbers carry a check digit: the first nine digits taken as a
//! number modulo 11. Before 1985 a remainder of 10 was written as 0.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::digits::{digits_value, is_ascii_digits};
use crate::error::{IdentifierError, Result};

/// Separator allowed between the date part and the suffix
pub const PERSONAL_ID_SEPARATOR: char = '/';

const DATE_PART_LENGTH: usize = 6;

/// Last year nine digit numbers were issued
const LAST_NINE_DIGIT_YEAR: i32 = 1953;

/// Births before this year may have remainder 10 written as check digit 0
const LEGACY_CHECKSUM_UNTIL_YEAR: i32 = 1985;

/// Sex encoded in the month field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Display name for output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Month offsets and what they encode
const MONTH_OFFSETS: [(u8, Sex, bool); 4] = [
    (0, Sex::Male, false),
    (20, Sex::Male, true),
    (50, Sex::Female, false),
    (70, Sex::Female, true),
];

/// Decoded month field of a personal identification number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BirthMonth {
    /// Calendar month, 1-12
    pub month: u8,
    pub sex: Sex,
    /// Set when the +20 offset marks an exhausted daily serial range
    pub extended_series: bool,
}

impl BirthMonth {
    /// Decode the raw two-digit month field.
    pub fn decode(raw: u8) -> Result<Self> {
        MONTH_OFFSETS
            .iter()
            .find(|(offset, _, _)| (offset + 1..=offset + 12).contains(&raw))
            .map(|&(offset, sex, extended_series)| Self {
                month: raw - offset,
                sex,
                extended_series,
            })
            .ok_or(IdentifierError::InvalidMonth(raw))
    }

    /// The raw two-digit month field this value decodes from.
    pub fn encode(&self) -> u8 {
        let offset = MONTH_OFFSETS
            .iter()
            .find(|(_, sex, extended)| *sex == self.sex && *extended == self.extended_series)
            .map(|(offset, _, _)| *offset)
            .unwrap_or(0);
        self.month + offset
    }
}

/// How a two-digit birth year is placed into a century.
///
/// Nine digit numbers always resolve to 1880-1953 regardless of the window;
/// the window only affects ten digit numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenturyWindow {
    /// `YY >= 54` is 19YY, otherwise 20YY (years 1954-2053)
    #[default]
    Standard,
    /// `YY >= pivot` is 19YY, otherwise 20YY
    Pivot(u8),
    /// Every year is `base + YY`, e.g. `Fixed(1900)`
    Fixed(i32),
}

impl CenturyWindow {
    /// Four-digit year for a two-digit `yy`.
    pub fn resolve_year(&self, yy: u8, nine_digit: bool) -> Result<i32> {
        let yy = i32::from(yy);
        if nine_digit {
            let year = if yy >= 80 { 1800 + yy } else { 1900 + yy };
            if year > LAST_NINE_DIGIT_YEAR {
                return Err(IdentifierError::NineDigitAfter1953(year));
            }
            return Ok(year);
        }

        let year = match *self {
            Self::Standard => split_century(yy, 54),
            Self::Pivot(pivot) => split_century(yy, i32::from(pivot)),
            Self::Fixed(base) => base.checked_add(yy).ok_or_else(|| {
                IdentifierError::InvalidArgument(format!("century base {base} out of range"))
            })?,
        };
        Ok(year)
    }
}

fn split_century(yy: i32, pivot: i32) -> i32 {
    if yy >= pivot {
        1900 + yy
    } else {
        2000 + yy
    }
}

/// A structurally valid personal identification number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalId {
    pub birth_date: NaiveDate,
    pub month: BirthMonth,
    /// Serial part after the date, 3 or 4 digits
    pub suffix: String,
}

impl PersonalId {
    /// Parse and verify a number, reporting why it is rejected.
    ///
    /// # Examples
    /// ```
    /// use urpa_identifiers::{CenturyWindow, PersonalId, Sex};
    /// let id = PersonalId::parse("635414/2234", CenturyWindow::Standard).unwrap();
    /// assert_eq!(id.sex(), Sex::Female);
    /// assert!(PersonalId::parse("645414/2234", CenturyWindow::Standard).is_err());
    /// ```
    pub fn parse(value: &str, window: CenturyWindow) -> Result<Self> {
        let (date, suffix) = split_number(value)?;
        let (birth_date, month) = decode_date(date, suffix.len() == 3, window)?;

        if suffix.len() == 4 {
            verify_check_digit(date, suffix, birth_date)?;
        }

        Ok(Self {
            birth_date,
            month,
            suffix: suffix.to_string(),
        })
    }

    pub fn sex(&self) -> Sex {
        self.month.sex
    }

    /// Whether the number carries a check digit (ten digit form).
    pub fn has_check_digit(&self) -> bool {
        self.suffix.len() == 4
    }

    /// Canonical `YYMMDD/XXXX` rendering.
    pub fn formatted(&self) -> String {
        format!(
            "{:02}{:02}{:02}{}{}",
            self.birth_date.year().rem_euclid(100),
            self.month.encode(),
            self.birth_date.day(),
            PERSONAL_ID_SEPARATOR,
            self.suffix
        )
    }
}

/// Check whether a personal identification number is valid.
///
/// Accepts `YYMMDDXXXX`, `YYMMDD/XXXX` and the nine digit forms. Uses the
/// standard century window.
///
/// # Examples
/// ```
/// use urpa_identifiers::validate_personal_id;
/// assert!(validate_personal_id("790604/7424"));
/// assert!(validate_personal_id("7906047424"));
/// assert!(!validate_personal_id("7806047424"));
/// ```
pub fn validate_personal_id(value: &str) -> bool {
    validate_personal_id_with(value, CenturyWindow::Standard)
}

/// Same as [`validate_personal_id`] with an explicit century window.
pub fn validate_personal_id_with(value: &str, window: CenturyWindow) -> bool {
    match PersonalId::parse(value, window) {
        Ok(_) => true,
        Err(err) => {
            debug!("Personal ID '{}' not valid: {}", value, err);
            false
        }
    }
}

/// Birth date encoded in a personal identification number.
///
/// The check digit is not verified.
pub fn birth_date(value: &str) -> Result<NaiveDate> {
    decode_birth(value, CenturyWindow::Standard).map(|(date, _)| date)
}

/// Birth date and decoded month field, without verifying the check digit.
pub fn decode_birth(value: &str, window: CenturyWindow) -> Result<(NaiveDate, BirthMonth)> {
    let (date, suffix) = split_number(value)?;
    decode_date(date, suffix.len() == 3, window)
}

/// Split into the 6 digit date part and the 3 or 4 digit suffix.
fn split_number(value: &str) -> Result<(&str, &str)> {
    let (date, suffix) = match value.split_once(PERSONAL_ID_SEPARATOR) {
        Some((date, suffix))
            if date.len() == DATE_PART_LENGTH && !suffix.contains(PERSONAL_ID_SEPARATOR) =>
        {
            (date, suffix)
        }
        Some(_) => return Err(IdentifierError::MisplacedSeparator),
        None => {
            if !is_ascii_digits(value) {
                return Err(IdentifierError::NonDigit(value.to_string()));
            }
            if value.len() < DATE_PART_LENGTH {
                return Err(invalid_length(value.len()));
            }
            value.split_at(DATE_PART_LENGTH)
        }
    };

    if !is_ascii_digits(date) || !is_ascii_digits(suffix) {
        return Err(IdentifierError::NonDigit(value.to_string()));
    }
    if !matches!(suffix.len(), 3 | 4) {
        return Err(invalid_length(date.len() + suffix.len()));
    }

    Ok((date, suffix))
}

fn invalid_length(actual: usize) -> IdentifierError {
    IdentifierError::InvalidLength {
        expected: "9 or 10 digits".to_string(),
        actual,
    }
}

fn decode_date(
    date: &str,
    nine_digit: bool,
    window: CenturyWindow,
) -> Result<(NaiveDate, BirthMonth)> {
    let field = |range: std::ops::Range<usize>| digits_value(&date[range]) as u8;
    let (yy, raw_month, day) = (field(0..2), field(2..4), field(4..6));

    let year = window.resolve_year(yy, nine_digit)?;
    let month = BirthMonth::decode(raw_month)?;

    let birth_date = NaiveDate::from_ymd_opt(year, u32::from(month.month), u32::from(day))
        .ok_or(IdentifierError::InvalidDate {
            year,
            month: u32::from(month.month),
            day: u32::from(day),
        })?;

    Ok((birth_date, month))
}

fn verify_check_digit(date: &str, suffix: &str, birth_date: NaiveDate) -> Result<()> {
    let (serial, check) = suffix.split_at(3);
    let stem = digits_value(date) * 1000 + digits_value(serial);

    let remainder = (stem % 11) as u32;
    let expected = if birth_date.year() < LEGACY_CHECKSUM_UNTIL_YEAR {
        remainder % 10
    } else {
        remainder
    };
    let actual = digits_value(check) as u32;

    if expected != actual {
        return Err(IdentifierError::ChecksumMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_month_offsets() {
        let male = BirthMonth::decode(6).unwrap();
        assert_eq!((male.month, male.sex, male.extended_series), (6, Sex::Male, false));

        let female = BirthMonth::decode(54).unwrap();
        assert_eq!((female.month, female.sex), (4, Sex::Female));

        let extended = BirthMonth::decode(72).unwrap();
        assert_eq!(extended.month, 2);
        assert_eq!(extended.sex, Sex::Female);
        assert!(extended.extended_series);
    }

    #[test]
    fn decode_month_rejects_gaps() {
        for raw in [0, 13, 20, 33, 41, 50, 63, 70, 83, 99] {
            assert_eq!(BirthMonth::decode(raw), Err(IdentifierError::InvalidMonth(raw)));
        }
    }

    #[test]
    fn month_encode_inverts_decode() {
        for raw in [1, 12, 21, 32, 51, 62, 71, 82] {
            assert_eq!(BirthMonth::decode(raw).unwrap().encode(), raw);
        }
    }

    #[test]
    fn standard_window() {
        let window = CenturyWindow::Standard;
        assert_eq!(window.resolve_year(54, false), Ok(1954));
        assert_eq!(window.resolve_year(53, false), Ok(2053));
        assert_eq!(window.resolve_year(0, false), Ok(2000));
        assert_eq!(window.resolve_year(90, true), Ok(1890));
        assert_eq!(window.resolve_year(53, true), Ok(1953));
        assert_eq!(
            window.resolve_year(54, true),
            Err(IdentifierError::NineDigitAfter1953(1954))
        );
    }

    #[test]
    fn pivot_and_fixed_windows() {
        assert_eq!(CenturyWindow::Pivot(30).resolve_year(29, false), Ok(2029));
        assert_eq!(CenturyWindow::Pivot(30).resolve_year(30, false), Ok(1930));
        assert_eq!(CenturyWindow::Fixed(1900).resolve_year(10, false), Ok(1910));
        assert_eq!(CenturyWindow::Fixed(2000).resolve_year(99, false), Ok(2099));
        // nine digit numbers ignore the window
        assert_eq!(CenturyWindow::Fixed(2000).resolve_year(20, true), Ok(1920));
    }

    #[test]
    fn fixed_window_overflow_is_an_error() {
        assert!(matches!(
            CenturyWindow::Fixed(i32::MAX - 47).resolve_year(99, false),
            Err(IdentifierError::InvalidArgument(_))
        ));
        assert!(!validate_personal_id_with(
            "9901010000",
            CenturyWindow::Fixed(2_147_483_600)
        ));
    }

    #[test]
    fn split_rejects_bad_separators() {
        assert_eq!(split_number("63541/42234"), Err(IdentifierError::MisplacedSeparator));
        assert_eq!(split_number("635414/2/234"), Err(IdentifierError::MisplacedSeparator));
        assert_eq!(split_number("635414/2234"), Ok(("635414", "2234")));
        assert_eq!(split_number("901111/111"), Ok(("901111", "111")));
    }

    #[test]
    fn parse_reports_checksum_mismatch() {
        assert_eq!(
            PersonalId::parse("7806047424", CenturyWindow::Standard),
            Err(IdentifierError::ChecksumMismatch {
                expected: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn parse_reports_impossible_date() {
        // 2001 is not a leap year
        assert_eq!(
            PersonalId::parse("0102290000", CenturyWindow::Standard),
            Err(IdentifierError::InvalidDate {
                year: 2001,
                month: 2,
                day: 29
            })
        );
    }

    #[test]
    fn decode_birth_ignores_check_digit() {
        let (date, month) = decode_birth("7806047424", CenturyWindow::Standard).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1978, 6, 4).unwrap());
        assert_eq!(month.sex, Sex::Male);
        assert!(PersonalId::parse("7806047424", CenturyWindow::Standard).is_err());

        let (date, _) = decode_birth("8001010040", CenturyWindow::Fixed(2000)).unwrap();
        assert_eq!(date.year(), 2080);
    }

    #[test]
    fn formatted_round_trip() {
        let id = PersonalId::parse("6354142234", CenturyWindow::Standard).unwrap();
        assert_eq!(id.formatted(), "635414/2234");
        assert!(id.has_check_digit());
    }
}
