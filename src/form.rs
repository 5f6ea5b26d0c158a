//! Form pre-flight checks
//!
//! Checks a front-end runs on operator input before calling the client.
//! They never reach the network and have no catalog code.

use thiserror::Error;

/// Rejected operator input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill all the required fields")]
    IncompleteFields,

    #[error("Passwords don't match")]
    PasswordMismatch,

    #[error("Invalid amount, please enter a value greater than 0")]
    InvalidAmount,
}

/// Every field must be non-empty
pub fn require_filled(fields: &[&str]) -> Result<(), FormError> {
    if fields.iter().any(|f| f.is_empty()) {
        return Err(FormError::IncompleteFields);
    }
    Ok(())
}

/// Password and its confirmation must be identical
pub fn confirm_password(password: &str, confirmation: &str) -> Result<(), FormError> {
    if password != confirmation {
        return Err(FormError::PasswordMismatch);
    }
    Ok(())
}

/// Amount must be a finite number greater than zero
///
/// The string is still sent verbatim; this only gates the call.
pub fn positive_amount(amount: &str) -> Result<(), FormError> {
    match amount.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(()),
        _ => Err(FormError::InvalidAmount),
    }
}
