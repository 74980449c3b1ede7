//! Domain error type shared by the layers above the repositories.
//!
//! The repository layer itself reports `sqlx::Error`; callers translate
//! into [`CoreError`] when they need a transport-independent failure.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: i64, available: i64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for the common lookup-miss case.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = CoreError::not_found("novel", 7);
        assert_eq!(err.to_string(), "Entity not found: novel with id 7");

        let err = CoreError::InsufficientBalance {
            needed: 500,
            available: 120,
        };
        assert_eq!(err.to_string(), "Insufficient balance: need 500, have 120");
    }
}
