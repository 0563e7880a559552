//! Password hashing for admin accounts (Argon2id)

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Minimum length accepted for a new admin password
pub const MIN_PASSWORD_LEN: usize = 10;

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored PHC string
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Password service for dependency injection
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash_password(password)
    }

    /// Verify and map a mismatch to `InvalidCredentials`
    pub fn verify_or_error(&self, password: &str, hash: &str) -> Result<(), AppError> {
        if verify_password(password, hash)? {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

/// Reject admin passwords that are short, single-class, or contain the username
pub fn validate_password_strength(password: &str, username: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Err(AppError::Validation(
            "Password must contain both letters and digits".to_string(),
        ));
    }

    if !username.is_empty()
        && password
            .to_lowercase()
            .contains(&username.to_lowercase())
    {
        return Err(AppError::Validation(
            "Password must not contain the username".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("ЯркийГород2015").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("ЯркийГород2015", &hash).unwrap());
        assert!(!verify_password("ЯркийГород2016", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let a = hash_password("same-password-1").unwrap();
        let b = hash_password("same-password-1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_or_error() {
        let service = PasswordService::new();
        let hash = service.hash("correct-horse-1").unwrap();

        assert!(service.verify_or_error("correct-horse-1", &hash).is_ok());
        assert!(matches!(
            service.verify_or_error("wrong-horse-1", &hash),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_malformed_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_strength_rules() {
        assert!(validate_password_strength("petrozavodsk2015", "manager").is_ok());
        assert!(validate_password_strength("short1", "manager").is_err());
        assert!(validate_password_strength("onlyletterslong", "manager").is_err());
        assert!(validate_password_strength("1234567890123", "manager").is_err());
        assert!(validate_password_strength("Manager-2024-x", "manager").is_err());
    }
}
