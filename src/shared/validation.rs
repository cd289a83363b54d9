/**
 * Field Validators
 *
 * Validation rules shared by the backend routing layer and the desktop
 * client forms. Each function checks one field and returns the normalized
 * value or a `SharedError::ValidationError` naming the field.
 */

use crate::shared::error::SharedError;

/// Minimum username length, counted after trimming
pub const MIN_USERNAME_LEN: usize = 3;
/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 6;
/// Maximum length of first and last names
pub const MAX_NAME_LEN: usize = 50;
/// Maximum length of the profile location
pub const MAX_LOCATION_LEN: usize = 100;
/// Maximum length of the profile bio
pub const MAX_BIO_LEN: usize = 500;

/// Trim a username and check its length.
pub fn validate_username(username: &str) -> Result<String, SharedError> {
    let username = username.trim();
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(SharedError::validation(
            "username",
            format!("Username must be at least {} characters", MIN_USERNAME_LEN),
        ));
    }
    Ok(username.to_string())
}

/// Basic email shape check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Trim and lower-case an email, rejecting anything that is not email shaped.
pub fn normalize_email(email: &str) -> Result<String, SharedError> {
    let email = email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(SharedError::validation("email", "Please enter a valid email"));
    }
    Ok(email)
}

pub fn validate_password(password: &str) -> Result<(), SharedError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

/// Require a non-blank value. Returns the trimmed value.
pub fn require_text(field: &str, value: &str, label: &str) -> Result<String, SharedError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation(field, format!("{} is required", label)));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional free-text field, mapping blank to `None` and enforcing a
/// maximum length.
pub fn optional_text(
    field: &str,
    value: Option<&str>,
    max_len: usize,
) -> Result<Option<String>, SharedError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > max_len {
        return Err(SharedError::validation(
            field,
            format!("Must be at most {} characters", max_len),
        ));
    }
    Ok(Some(value.to_string()))
}

/// Trim tags and drop the empty ones, keeping their order.
pub fn clean_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| tag.as_ref().trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Split a comma separated tag input (`"love, hope, dreams"`).
pub fn parse_tags(input: &str) -> Vec<String> {
    clean_tags(input.split(','))
}
