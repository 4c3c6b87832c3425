//! Common interface over the identifier validators

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::account_number::validate_account_number;
use crate::business_registration::validate_business_registration_number;
use crate::config::IdentifierConfig;
use crate::error::IdentifierError;
use crate::personal_id::{validate_personal_id_with, CenturyWindow};

/// A fixed checksum algorithm for one identifier format.
pub trait Validator {
    fn is_valid(&self, value: &str) -> bool;
}

pub struct PersonalIdChecksum {
    pub window: CenturyWindow,
}

impl Validator for PersonalIdChecksum {
    fn is_valid(&self, value: &str) -> bool {
        validate_personal_id_with(value, self.window)
    }
}

pub struct BusinessRegistrationChecksum;

impl Validator for BusinessRegistrationChecksum {
    fn is_valid(&self, value: &str) -> bool {
        validate_business_registration_number(value)
    }
}

pub struct AccountNumberChecksum;

impl Validator for AccountNumberChecksum {
    fn is_valid(&self, value: &str) -> bool {
        validate_account_number(value)
    }
}

/// Identifier formats known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierKind {
    PersonalId,
    BusinessRegistration,
    AccountNumber,
}

impl IdentifierKind {
    pub const ALL: [IdentifierKind; 3] = [
        IdentifierKind::PersonalId,
        IdentifierKind::BusinessRegistration,
        IdentifierKind::AccountNumber,
    ];

    /// Validator for this format, honoring `config`.
    pub fn validator(&self, config: &IdentifierConfig) -> Box<dyn Validator> {
        match self {
            Self::PersonalId => Box::new(PersonalIdChecksum {
                window: config.personal_id.century,
            }),
            Self::BusinessRegistration => Box::new(BusinessRegistrationChecksum),
            Self::AccountNumber => Box::new(AccountNumberChecksum),
        }
    }

    /// Name used on the command line and in JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PersonalId => "personal-id",
            Self::BusinessRegistration => "business-registration",
            Self::AccountNumber => "account-number",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IdentifierKind {
    type Err = IdentifierError;

    /// Accepts the kebab-case names and the short forms `rc`, `ico` and
    /// `account`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "personal-id" | "rc" => Ok(Self::PersonalId),
            "business-registration" | "ico" | "bin" => Ok(Self::BusinessRegistration),
            "account-number" | "account" => Ok(Self::AccountNumber),
            other => Err(IdentifierError::InvalidArgument(format!(
                "unknown identifier kind '{other}'"
            ))),
        }
    }
}
