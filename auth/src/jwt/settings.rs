use std::fmt;

use chrono::Duration;

/// Signing configuration shared by [`TokenIssuer`](super::TokenIssuer) and
/// [`TokenValidator`](super::TokenValidator).
///
/// Built once at startup and handed to the constructors; neither reads the
/// environment on its own.
#[derive(Clone)]
pub struct TokenSettings {
    secret: Vec<u8>,
    issuer: String,
    validity: Duration,
}

impl TokenSettings {
    pub const DEFAULT_ISSUER: &'static str = "AuthService";
    pub const DEFAULT_VALIDITY_MINUTES: i64 = 120;

    /// Create settings with the default 120 minute validity window.
    ///
    /// # Arguments
    /// * `secret` - HMAC key (should be at least 32 bytes for HS256)
    /// * `issuer` - Value written to the `iss` claim
    pub fn new(secret: impl Into<Vec<u8>>, issuer: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            validity: Duration::minutes(Self::DEFAULT_VALIDITY_MINUTES),
        }
    }

    /// Set the validity window of issued tokens.
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"[redacted]")
            .field("issuer", &self.issuer)
            .field("validity", &self.validity)
            .finish()
    }
}
