//! Checks run on form input before anything is sent to the server.

use time::{macros::format_description, Date};

/// A form value that must be fixed before submitting.
///
/// The messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must be a non-negative number")]
    InvalidAmount(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("Please select a category")]
    MissingCategory,

    #[error("Please select the account to take money from")]
    MissingSource,

    #[error("Please select the account to put money into")]
    MissingDestination,

    #[error("Source and destination accounts must be different")]
    SameAccount,

    #[error("There is no transfer category, transfers are unavailable")]
    NoTransferCategory,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{0} is not a valid date")]
    InvalidDate(&'static str),

    #[error("End date should be after start date")]
    DateOrder,
}

/// The trimmed value of `text`, or [ValidationError::Required] if it is blank.
pub fn require<'a>(field: &'static str, text: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed)
}

/// Parse a finite, non-negative amount such as an account balance.
pub fn parse_amount(field: &'static str, text: &str) -> Result<f64, ValidationError> {
    let text = require(field, text)?;

    match text.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(ValidationError::InvalidAmount(field)),
    }
}

/// Parse a transaction sum, which must also be greater than zero.
pub fn parse_sum(text: &str) -> Result<f64, ValidationError> {
    let sum = parse_amount("Sum", text)?;
    if sum == 0.0 {
        return Err(ValidationError::NotPositive("Sum"));
    }
    Ok(sum)
}

pub fn check_passwords(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Check that `from` is not after `till`.
///
/// Blank dates are let through so that the server can report them against the
/// right field.
pub fn check_date_range(from: &str, till: &str) -> Result<(), ValidationError> {
    let (from, till) = (from.trim(), till.trim());
    if from.is_empty() || till.is_empty() {
        return Ok(());
    }

    let from = parse_date("Start date", from)?;
    let till = parse_date("End date", till)?;

    if from > till {
        return Err(ValidationError::DateOrder);
    }
    Ok(())
}

fn parse_date(field: &'static str, text: &str) -> Result<Date, ValidationError> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate(field))
}
