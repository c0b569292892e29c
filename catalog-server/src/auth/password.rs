//! Password hashing and verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use super::AuthError;

/// Argon2 hashing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl PasswordParams {
    /// Cheapest parameters argon2 accepts. Tests only.
    pub const fn insecure_fast() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn to_argon2(self) -> Result<Argon2<'static>, AuthError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| AuthError::Hash(format!("invalid argon2 params: {e}")))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for PasswordParams {
    /// Argon2id RFC recommendations
    fn default() -> Self {
        Self {
            memory_kib: 19456, // 19 MB
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Hash a password with a fresh random salt, returning a PHC string.
pub fn hash_password(input: &str, params: PasswordParams) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = params
        .to_argon2()?
        .hash_password(input.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(format!("hash password: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC string.
///
/// Uses the parameters embedded in the hash itself. The digest comparison is
/// constant-time.
pub fn verify_password(input: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hash(format!("parse hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(input.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: PasswordParams = PasswordParams::insecure_fast();

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("John@1234", FAST).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("John@1234", &hash).unwrap());
        assert!(!verify_password("john@1234", &hash).unwrap());
    }

    #[test]
    fn same_input_different_salts() {
        let a = hash_password("secret", FAST).unwrap();
        let b = hash_password("secret", FAST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_is_error() {
        assert!(verify_password("secret", "plaintext").is_err());
    }

    #[test]
    fn bad_params_rejected() {
        let params = PasswordParams {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        assert!(hash_password("secret", params).is_err());
    }
}
