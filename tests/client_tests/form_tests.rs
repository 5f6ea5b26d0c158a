//! Form Check Tests

use telegods::form::{confirm_password, positive_amount, require_filled, FormError};

#[test]
fn test_require_filled() {
    assert_eq!(require_filled(&["alice", "pw"]), Ok(()));
    assert_eq!(require_filled(&["alice", ""]), Err(FormError::IncompleteFields));
    assert_eq!(require_filled(&[]), Ok(()));
}

#[test]
fn test_confirm_password() {
    assert_eq!(confirm_password("pw", "pw"), Ok(()));
    assert_eq!(confirm_password("pw", "Pw"), Err(FormError::PasswordMismatch));
}

#[test]
fn test_positive_amount() {
    for ok in ["1", "0.01", "250", "1e3"] {
        assert_eq!(positive_amount(ok), Ok(()), "{:?}", ok);
    }
    for bad in ["0", "-5", "", "abc", "NaN", "inf"] {
        assert_eq!(positive_amount(bad), Err(FormError::InvalidAmount), "{:?}", bad);
    }
}

#[test]
fn test_messages() {
    assert_eq!(
        FormError::IncompleteFields.to_string(),
        "Please fill all the required fields"
    );
    assert_eq!(FormError::PasswordMismatch.to_string(), "Passwords don't match");
}
