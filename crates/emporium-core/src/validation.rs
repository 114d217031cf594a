//! Validation utilities.

use crate::{EmporiumError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns an `EmporiumError` on failure.
    fn validate_request(&self) -> Result<(), EmporiumError> {
        self.validate().map_err(validation_errors_to_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to an `EmporiumError`.
#[must_use]
pub fn validation_errors_to_error(errors: ValidationErrors) -> EmporiumError {
    let field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect();

    let message = field_errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    EmporiumError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use rust_decimal::Decimal;
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that a price is non-negative.
    pub fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
        if price.is_sign_negative() {
            return Err(ValidationError::new("price_negative"));
        }
        Ok(())
    }

    /// Validates that a password meets complexity requirements.
    pub fn password_complexity(password: &str) -> Result<(), ValidationError> {
        if password.len() < 8 {
            return Err(ValidationError::new("password_too_short"));
        }
        if !password.chars().any(|c| c.is_uppercase()) {
            return Err(ValidationError::new("password_missing_uppercase"));
        }
        if !password.chars().any(|c| c.is_lowercase()) {
            return Err(ValidationError::new("password_missing_lowercase"));
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new("password_missing_digit"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("SKU-A001").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_non_negative_price() {
        assert!(non_negative_price(&dec!(0)).is_ok());
        assert!(non_negative_price(&dec!(19.99)).is_ok());
        assert!(non_negative_price(&dec!(-0.01)).is_err());
    }

    #[test]
    fn test_password_complexity() {
        assert!(password_complexity("Abcd1234").is_ok());
        assert!(password_complexity("short").is_err());
        assert!(password_complexity("nouppercase1").is_err());
        assert!(password_complexity("NOLOWERCASE1").is_err());
        assert!(password_complexity("NoDigitsHere").is_err());
    }
}
