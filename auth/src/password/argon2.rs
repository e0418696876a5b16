use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Work factor and input limits for password hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasherSettings {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
    /// Longest accepted plaintext, in bytes
    pub max_length: usize,
}

impl HasherSettings {
    pub const DEFAULT_MAX_LENGTH: usize = 1024;
}

impl Default for HasherSettings {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
            max_length: Self::DEFAULT_MAX_LENGTH,
        }
    }
}

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
/// Hashes are emitted in PHC string format, so the salt and the work factor
/// travel with the hash and verification never depends on current settings.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    max_length: usize,
}

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with Argon2id defaults
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
            max_length: HasherSettings::DEFAULT_MAX_LENGTH,
        }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `settings` - Memory, iteration and parallelism costs plus the input cap
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the parameters
    pub fn with_settings(settings: HasherSettings) -> Result<Self, PasswordError> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| PasswordError::HashingFailed(format!("Invalid argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            max_length: settings.max_length.min(argon2::MAX_PWD_LEN),
        })
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password is too long or the hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > self.max_length {
            return Err(PasswordError::HashingFailed(format!(
                "Password exceeds maximum length of {} bytes",
                self.max_length
            )));
        }

        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The candidate is hashed with the salt and parameters embedded in
    /// `hash`; the digests are compared in constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match the hash
    /// * `InvalidHash` - Hash format is invalid or verification failed
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

        // Nothing longer than the cap can have been hashed by us.
        if password.len() > self.max_length {
            return Err(PasswordError::Mismatch);
        }

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(()),
            Err(PasswordHashError::Password) => Err(PasswordError::Mismatch),
            Err(e) => Err(PasswordError::InvalidHash(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::with_settings(HasherSettings {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
            max_length: 64,
        })
        .expect("Failed to build hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert_eq!(hasher.verify(password, &hash), Ok(()));
        assert_eq!(
            hasher.verify("wrong_password", &hash),
            Err(PasswordError::Mismatch)
        );
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = cheap_hasher();

        let first = hasher.hash("secret1").unwrap();
        let second = hasher.hash("secret1").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(!first.contains("secret1"));
    }

    #[test]
    fn test_verify_uses_parameters_embedded_in_hash() {
        let hash = cheap_hasher().hash("secret1").unwrap();

        // A hasher with a different work factor still verifies older hashes.
        assert_eq!(PasswordHasher::new().verify("secret1", &hash), Ok(()));
        assert!(hash.contains("m=1024,t=1,p=1"));
    }

    #[test]
    fn test_verify_rejects_near_miss() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("secret1").unwrap();

        for candidate in ["secret", "secret12", "Secret1", "", " secret1"] {
            assert_eq!(
                hasher.verify(candidate, &hash),
                Err(PasswordError::Mismatch),
                "candidate {:?} should not verify",
                candidate
            );
        }
    }

    #[test]
    fn test_hash_rejects_oversized_input() {
        let hasher = cheap_hasher();
        let oversized = "x".repeat(65);

        let result = hasher.hash(&oversized);
        assert!(matches!(result, Err(PasswordError::HashingFailed(_))));

        assert!(hasher.hash(&"x".repeat(64)).is_ok());
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let result = PasswordHasher::with_settings(HasherSettings {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
            max_length: 64,
        });
        assert!(matches!(result, Err(PasswordError::HashingFailed(_))));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));
    }
}
