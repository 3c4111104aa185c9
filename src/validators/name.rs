use super::ValidationError;

const MAX_NAME_LENGTH: usize = 100;

/// `field` names the input in the error message, e.g. `"first_name"`.
pub fn validate_name(field: &'static str, name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::NameEmpty(field));
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong(field));
    }

    Ok(())
}
