use crate::errors::{AppError, AppResult};

pub fn require_owner(caller: &str, resource_owner: &str) -> AppResult<()> {
    if caller != resource_owner {
        return Err(AppError::Unauthorized(
            "You can only access your own quiz sessions".to_string(),
        ));
    }
    Ok(())
}
