use thiserror::Error;

/// Failure kinds shared by repositories, services and handlers.
///
/// The HTTP layer maps each variant to exactly one status code, so
/// services never deal with transport concerns.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} not found")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Bad credentials. Deliberately carries no detail about which check failed.
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Validation(String),

    /// Unique or foreign-key constraint violation.
    #[error("{0}")]
    Conflict(String),

    /// The datastore could not be reached. The inner message is for logs only.
    #[error("Database connection error")]
    Unavailable(String),

    #[error("Unexpected error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::Unauthorized("Invalid credentials".to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_entity_only() {
        let err = DomainError::not_found("User", "email", "ghost@example.com");
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn unavailable_hides_driver_details() {
        let err = DomainError::Unavailable("pool timed out after 30s".into());
        assert_eq!(err.to_string(), "Database connection error");
    }
}
