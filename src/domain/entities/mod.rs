pub mod candidate;
pub mod candidate_skill;
pub mod skill;

use validator::ValidationError;

/// Rejects values that are empty or whitespace-only.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
