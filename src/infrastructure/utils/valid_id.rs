use crate::errors::AppError;

/// Checks that a path identifier is a positive integer.
pub fn valid_id(id: i32) -> Result<i32, AppError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(AppError::InvalidInput("Not a valid id".to_string()))
    }
}
