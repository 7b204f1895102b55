//! Password hashing using Argon2id
//!
//! Hashes are stored as PHC strings, which embed the algorithm, the
//! parameters and the salt. Verification reads the parameters back from the
//! stored hash, so changing the constants below only affects new hashes.
//!
//! # Parameters
//!
//! - **Memory**: 19 MiB (19456 KiB)
//! - **Iterations**: 2 passes
//! - **Parallelism**: 1 lane
//! - **Output**: 32-byte hash
//!
//! # Example
//!
//! ```
//! use tomato_shared::auth::password::{hash_password, verify_password};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hash = hash_password("super_secret_password_123")?;
//!
//! assert!(verify_password("super_secret_password_123", &hash)?);
//! assert!(!verify_password("wrong_password", &hash)?);
//! # Ok(())
//! # }
//! ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, ParamsBuilder, Version,
};

/// Memory cost in KiB
pub const MEMORY_COST_KIB: u32 = 19_456;

/// Number of passes over memory
pub const TIME_COST: u32 = 2;

/// Degree of parallelism
pub const PARALLELISM: u32 = 1;

/// Length of the derived hash in bytes
pub const OUTPUT_LEN: usize = 32;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Stored hash is not a valid PHC string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Stands in for a stored hash when the username is unknown, so a failed
/// login costs the same whichever half of the credentials was wrong
pub(crate) const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$dG9tYXRvLWR1bW15$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = ParamsBuilder::new()
        .m_cost(MEMORY_COST_KIB)
        .t_cost(TIME_COST)
        .p_cost(PARALLELISM)
        .output_len(OUTPUT_LEN)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password with a fresh random salt
///
/// Hashing the same plaintext twice yields two different strings.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored hash
///
/// A mismatch is `Ok(false)`, never an error. Comparison is constant-time.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the stored hash is not a complete
/// PHC string (including one with no hash output), or
/// `PasswordError::VerifyError` for any other verification failure.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let stored = PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    if stored.hash.is_none() {
        return Err(PasswordError::InvalidHash("missing hash output".to_string()));
    }

    // Cost parameters are taken from the stored hash, not from the constants
    match hasher()?.verify_password(password.as_bytes(), &stored) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salt_of(hash: &str) -> String {
        let parsed = PasswordHash::new(hash).unwrap();
        parsed.salt.unwrap().as_str().to_string()
    }

    #[test]
    fn test_hash_records_configured_parameters() {
        let hash = hash_password("correct horse").unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();

        assert_eq!(parsed.algorithm.as_str(), "argon2id");
        assert_eq!(parsed.params.get_decimal("m"), Some(MEMORY_COST_KIB));
        assert_eq!(parsed.params.get_decimal("t"), Some(TIME_COST));
        assert_eq!(parsed.params.get_decimal("p"), Some(PARALLELISM));
        assert_eq!(parsed.hash.map(|output| output.len()), Some(OUTPUT_LEN));
    }

    #[test]
    fn test_same_password_gets_a_new_salt_each_time() {
        let first = hash_password("correct horse").unwrap();
        let second = hash_password("correct horse").unwrap();

        assert_ne!(salt_of(&first), salt_of(&second));
        assert!(verify_password("correct horse", &first).unwrap());
        assert!(verify_password("correct horse", &second).unwrap());
    }

    #[test]
    fn test_mismatch_is_false_not_error() {
        let hash = hash_password("correct horse").unwrap();

        assert!(!verify_password("battery staple", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_stored_hash_without_output_is_rejected() {
        let result = verify_password("correct horse", "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ");
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));

        let result = verify_password("correct horse", "$argon2id$invalid");
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));
    }

    #[test]
    fn test_non_phc_hash_is_rejected() {
        let result = verify_password("correct horse", "plaintext-from-an-old-import");
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));
    }

    #[test]
    fn test_dummy_hash_never_matches() {
        assert!(!verify_password("correct horse", DUMMY_HASH).unwrap());
        assert!(!verify_password("", DUMMY_HASH).unwrap());
    }
}
