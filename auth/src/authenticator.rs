use crate::jwt::JwtError;
use crate::jwt::Principal;
use crate::jwt::TokenClaims;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenSettings;
use crate::jwt::TokenValidator;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Provides high-level authentication operations by coordinating
/// password hashing, token issuance and token validation. Immutable once
/// built, so a single instance is shared across request handlers.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Re-issued token with the same claims shape and validity window
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the default password work factor.
    ///
    /// # Arguments
    /// * `settings` - Token signing configuration
    ///
    /// # Errors
    /// * `InvalidKey` - Signing configuration is unusable
    pub fn new(settings: &TokenSettings) -> Result<Self, JwtError> {
        Self::with_password_hasher(settings, PasswordHasher::new())
    }

    /// Create a new authenticator with an explicitly configured hasher.
    pub fn with_password_hasher(
        settings: &TokenSettings,
        password_hasher: PasswordHasher,
    ) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher,
            token_issuer: TokenIssuer::new(settings)?,
            token_validator: TokenValidator::new(settings)?,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Password too long or hashing failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate tokens.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `principal` - Identity to encode in the tokens
    ///
    /// # Returns
    /// AuthenticationResult with access and refresh tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        principal: &Principal,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        match self.password_hasher.verify(password, stored_hash) {
            Ok(()) => {}
            Err(PasswordError::Mismatch) => return Err(AuthenticationError::InvalidCredentials),
            Err(e) => return Err(AuthenticationError::PasswordError(e)),
        }

        Ok(self.refresh(principal)?)
    }

    /// Generate tokens without password verification.
    ///
    /// Used for the refresh flow, where the caller already holds a valid token.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn refresh(&self, principal: &Principal) -> Result<AuthenticationResult, JwtError> {
        Ok(AuthenticationResult {
            access_token: self.token_issuer.issue(principal)?,
            refresh_token: self.token_issuer.refresh(principal)?,
        })
    }

    /// Validate and decode JWT token.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.token_validator.validate(token)
    }

    pub fn token_issuer(&self) -> &TokenIssuer {
        &self.token_issuer
    }
}
