use super::errors::{UseCaseResult, bad_request};

/// Trimmed, non-empty and at most `max` characters.
pub fn required_text(field: &str, value: &str, max: usize) -> UseCaseResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(bad_request(format!("{} is required", field)));
    }
    if value.chars().count() > max {
        return Err(bad_request(format!(
            "{} cannot exceed {} characters",
            field, max
        )));
    }
    Ok(value.to_string())
}

/// Empty strings collapse to `None`.
pub fn optional_text(field: &str, value: Option<String>, max: usize) -> UseCaseResult<Option<String>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.chars().count() > max => Err(bad_request(format!(
            "{} cannot exceed {} characters",
            field, max
        ))),
        Some(value) => Ok(Some(value.to_string())),
    }
}

pub fn non_negative(field: &str, value: f64) -> UseCaseResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(bad_request(format!("{} must be a non-negative number", field)));
    }
    Ok(value)
}

pub fn within(field: &str, value: f64, min: f64, max: f64) -> UseCaseResult<f64> {
    if !value.is_finite() || value < min || value > max {
        return Err(bad_request(format!(
            "{} must be between {} and {}",
            field, min, max
        )));
    }
    Ok(value)
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !local.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains(['@', ' '])
}
