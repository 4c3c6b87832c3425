//! Checksum validation for identifiers handled by RPA robots
//!
//! This crate provides fixed, closed validation algorithms for:
//! - Personal identification numbers (`YYMMDD/XXXX`, including the pre-1954
//!   nine-digit form)
//! - Business registration numbers (8 digits, modulus-11 check digit)
//! - Bank account numbers (`[prefix-]number[/bank]`, 2^n mod 11 weights)
//!
//! Every validator is a total function over `&str`: malformed input is simply
//! reported as `false`. The `parse` constructors report the rejection reason.

pub mod account_number;
pub mod business_registration;
pub mod config;
mod digits;
pub mod error;
pub mod personal_id;
pub mod validator;

pub use account_number::*;
pub use business_registration::*;
pub use config::*;
pub use error::*;
pub use personal_id::*;
pub use validator::*;
