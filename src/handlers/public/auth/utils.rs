use crate::error::ApiError;

/// Reject blank credential fields before touching the store.
pub fn require_present(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("Field '{}' is required", field)));
    }
    Ok(())
}
