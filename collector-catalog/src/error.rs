use thiserror::Error;

use crate::price::Price;

/// A record failed field validation before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field was missing or blank.
    #[error("Field '{0}' is required")]
    EmptyField(&'static str),

    #[error("Price must not be negative (got {0})")]
    NegativePrice(Price),

    #[error("Year {0} is out of range (expected 1-9999)")]
    YearOutOfRange(i32),

    /// Text that could not be read as a currency amount.
    #[error("Invalid price '{0}'")]
    InvalidPrice(String),
}

/// Reject a blank required field.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

pub(crate) fn check_year(year: i32) -> Result<(), ValidationError> {
    if (1..=9999).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::YearOutOfRange(year))
    }
}
