use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Principal;
use super::claims::TokenClaims;
use super::errors::JwtError;
use super::settings::TokenSettings;

/// Mints signed, time-bounded access tokens.
///
/// Uses HS256 (HMAC with SHA-256).
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    algorithm: Algorithm,
    issuer: String,
    validity: Duration,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `settings` - Secret, issuer name and validity window
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is empty or the validity window is not positive
    pub fn new(settings: &TokenSettings) -> Result<Self, JwtError> {
        if settings.secret().is_empty() {
            return Err(JwtError::InvalidKey("signing secret is empty".to_string()));
        }
        if settings.validity() <= Duration::zero() {
            return Err(JwtError::InvalidKey(
                "token validity must be positive".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(settings.secret()),
            algorithm: Algorithm::HS256,
            issuer: settings.issuer().to_string(),
            validity: settings.validity(),
        })
    }

    /// Issue a token for `principal`, valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be built, serialized or signed
    pub fn issue(&self, principal: &Principal) -> Result<String, JwtError> {
        self.issue_at(principal, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, principal: &Principal, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = TokenClaims::for_principal(principal, &self.issuer, now, self.validity)
            .ok_or_else(|| JwtError::EncodingFailed("expiry out of range".to_string()))?;

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        tracing::debug!(
            subject = %principal.id,
            expires_at = claims.exp,
            "Token issued"
        );

        Ok(token)
    }

    /// Issue a replacement token for an already authenticated principal.
    ///
    /// There is no separate refresh grant: the result is an ordinary access
    /// token with a fresh validity window.
    pub fn refresh(&self, principal: &Principal) -> Result<String, JwtError> {
        self.issue(principal)
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }
}
