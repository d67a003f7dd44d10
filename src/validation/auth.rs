use crate::error::{AppError, Result};

/// The minimum number of characters in an RGA.
pub const MIN_RGA_LEN: usize = 8;

/// Validates the sign-in form before any credential check.
///
/// # Arguments
///
/// * `rga` - The student registration identifier.
/// * `password` - The password.
///
/// # Returns
///
/// A `Result<()>` indicating whether the form is complete.
pub fn validate_login_form(rga: &str, password: &str) -> Result<()> {
    if rga.trim().is_empty() || password.trim().is_empty() {
        return Err(AppError::Validation(
            "Please fill in all fields".to_string(),
        ));
    }

    validate_rga(rga)
}

/// Validates an RGA.
///
/// # Arguments
///
/// * `rga` - The RGA to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the RGA is long enough.
pub fn validate_rga(rga: &str) -> Result<()> {
    if rga.chars().count() < MIN_RGA_LEN {
        return Err(AppError::Validation(format!(
            "RGA must have at least {} digits",
            MIN_RGA_LEN
        )));
    }

    Ok(())
}
