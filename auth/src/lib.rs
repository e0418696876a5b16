//! Authentication utilities library
//!
//! Provides the authentication core for the account service:
//! - Password hashing (Argon2id, configurable work factor)
//! - JWT issuance and validation (HMAC family only)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! assert!(hasher.verify("not_my_password", &hash).is_err());
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Principal, TokenIssuer, TokenSettings, TokenValidator};
//!
//! let settings = TokenSettings::new("secret_key_at_least_32_bytes_long!", "AuthService");
//! let issuer = TokenIssuer::new(&settings).unwrap();
//! let validator = TokenValidator::new(&settings).unwrap();
//!
//! let token = issuer.issue(&Principal::new("42", "a@b.com")).unwrap();
//! let claims = validator.validate(&token).unwrap();
//! assert_eq!(claims.email, "a@b.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Principal, TokenSettings};
//!
//! let settings = TokenSettings::new("secret_key_at_least_32_bytes_long!", "AuthService");
//! let auth = Authenticator::new(&settings).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let principal = Principal::new("42", "a@b.com");
//! let result = auth.authenticate("password123", &hash, &principal).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "42");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::JwtError;
pub use jwt::Principal;
pub use jwt::TokenClaims;
pub use jwt::TokenIssuer;
pub use jwt::TokenSettings;
pub use jwt::TokenValidator;
pub use password::HasherSettings;
pub use password::PasswordError;
pub use password::PasswordHasher;
