//! Custom `validator` rules shared by request DTOs

use std::borrow::Cow;

use validator::ValidationError;

use crate::infrastructure::MAX_PASSWORD_BYTES;

/// `length(max = ..)` counts characters; bcrypt's input limit is in bytes.
pub fn password_within_bcrypt_limit(password: &str) -> Result<(), ValidationError> {
    if password.len() <= MAX_PASSWORD_BYTES {
        return Ok(());
    }

    let mut err = ValidationError::new("password_too_long");
    err.message = Some(Cow::from(format!(
        "password must be at most {} bytes",
        MAX_PASSWORD_BYTES
    )));
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_inclusive() {
        assert!(password_within_bcrypt_limit(&"a".repeat(72)).is_ok());
        assert!(password_within_bcrypt_limit(&"a".repeat(73)).is_err());
    }

    #[test]
    fn multibyte_characters_count_as_bytes() {
        assert!(password_within_bcrypt_limit(&"é".repeat(36)).is_ok());

        let err = password_within_bcrypt_limit(&"é".repeat(72)).unwrap_err();
        assert_eq!(err.code, "password_too_long");
    }
}
