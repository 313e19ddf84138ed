use std::borrow::Cow;
use validator::ValidationError;

use crate::catalog::AgeGroup;

pub const PHONE_DIGITS: usize = 10;

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(field_error("required", message))
    } else {
        Ok(())
    }
}

pub fn validate_student_name(value: &str) -> Result<(), ValidationError> {
    required(value, "Student name is required")
}

pub fn validate_father_name(value: &str) -> Result<(), ValidationError> {
    required(value, "Father name is required")
}

pub fn validate_address(value: &str) -> Result<(), ValidationError> {
    required(value, "Address is required")
}

/// Digits of `phone` with every other character removed
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    required(value, "Contact number is required")?;

    if normalize_phone(value).len() == PHONE_DIGITS {
        Ok(())
    } else {
        Err(field_error(
            "invalid_phone",
            "Please enter a valid 10-digit phone number",
        ))
    }
}

pub fn validate_age_group(value: &str) -> Result<(), ValidationError> {
    required(value, "Please select an age group")?;

    value
        .parse::<AgeGroup>()
        .map(|_| ())
        .map_err(|_| field_error("invalid_age_group", "Please select a valid age group"))
}
