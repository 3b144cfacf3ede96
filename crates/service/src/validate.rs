//! Field formats for user records. Pure functions, no I/O.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static MOBILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("mobile pattern compiles"));
static PAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("pan pattern compiles"));

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Full name cannot be empty")]
    EmptyName,
    #[error("Invalid mobile number format")]
    InvalidMobile,
    #[error("Invalid PAN number format")]
    InvalidPan,
}

/// Exactly ten ASCII digits.
pub fn validate_mobile(s: &str) -> bool {
    MOBILE_RE.is_match(s)
}

/// Five uppercase letters, four digits, one uppercase letter.
pub fn validate_pan(s: &str) -> bool {
    PAN_RE.is_match(s)
}

/// Non-empty once surrounding whitespace is trimmed.
pub fn validate_name(s: &str) -> bool {
    !s.trim().is_empty()
}

pub fn check_name(s: &str) -> Result<(), ValidationError> {
    if validate_name(s) { Ok(()) } else { Err(ValidationError::EmptyName) }
}

pub fn check_mobile(s: &str) -> Result<(), ValidationError> {
    if validate_mobile(s) { Ok(()) } else { Err(ValidationError::InvalidMobile) }
}

pub fn check_pan(s: &str) -> Result<(), ValidationError> {
    if validate_pan(s) { Ok(()) } else { Err(ValidationError::InvalidPan) }
}

/// Name, then mobile, then PAN; the first failure wins.
pub fn validate_all(full_name: &str, mob_num: &str, pan_num: &str) -> Result<(), ValidationError> {
    check_name(full_name)?;
    check_mobile(mob_num)?;
    check_pan(pan_num)?;
    Ok(())
}
