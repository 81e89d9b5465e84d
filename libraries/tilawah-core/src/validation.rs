//! Sign-in and registration form validation
//!
//! Errors carry the message shown to the user.

use crate::error::{Result, TilawahError};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check that `email` looks like `local@domain.tld`
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    let invalid = || TilawahError::invalid_input("Please enter a valid email address");

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

/// Check password length
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(TilawahError::invalid_input(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Sign-in form
pub fn validate_sign_in(email: &str, password: &str) -> Result<()> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(TilawahError::invalid_input("Please enter your password"));
    }
    Ok(())
}

/// Registration form
pub fn validate_registration(
    full_name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<()> {
    if full_name.trim().is_empty() {
        return Err(TilawahError::invalid_input("Please enter your name"));
    }
    validate_email(email)?;
    validate_password(password)?;
    if password != confirm_password {
        return Err(TilawahError::invalid_input("Passwords do not match"));
    }
    Ok(())
}
