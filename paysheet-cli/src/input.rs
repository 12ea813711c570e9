//! Field-level validation at the presentation boundary.
//!
//! Everything here runs before the core is invoked: the core assumes
//! well-typed, non-negative input and only checks semantic constraints
//! (unknown role, out-of-range index) itself.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Date format accepted on the command line, matching the sheet cells.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("role must not be empty (and no fixed role is known for this employee)")]
    EmptyRole,

    #[error("a reason must be given when an extra amount is entered")]
    MissingReason,

    #[error("invalid {field} '{value}': expected a non-negative decimal amount")]
    InvalidAmount { field: &'static str, value: String },

    #[error("invalid date '{0}': expected day/month/year")]
    InvalidDate(String),
}

/// Parses a money field: a decimal, zero or greater.
pub fn parse_amount(
    field: &'static str,
    value: &str,
) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::InvalidAmount {
        field,
        value: value.to_string(),
    };
    let amount: Decimal = value.trim().parse().map_err(|_| invalid())?;
    if amount < Decimal::ZERO {
        return Err(invalid());
    }
    Ok(amount)
}

/// Parses a day/month/year date string.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Checks the name field before role resolution.
pub fn require_name(name: &str) -> Result<&str, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name)
}

/// Checks the role after fixed-employee resolution: an empty entered role
/// passes through `resolve` untouched and is rejected here.
pub fn require_role(role: &str) -> Result<&str, ValidationError> {
    let role = role.trim();
    if role.is_empty() {
        return Err(ValidationError::EmptyRole);
    }
    Ok(role)
}

/// A bonus needs an explanation; a zero bonus does not.
pub fn require_reason(
    extra_amount: Decimal,
    reason: &str,
) -> Result<(), ValidationError> {
    if extra_amount > Decimal::ZERO && reason.trim().is_empty() {
        return Err(ValidationError::MissingReason);
    }
    Ok(())
}
