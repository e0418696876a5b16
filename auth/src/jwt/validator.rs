use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::Error as JsonWebTokenError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::JwtError;
use super::settings::TokenSettings;

/// Algorithms accepted on presented tokens: the symmetric HMAC family.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Verifies presented tokens and extracts their claims.
///
/// Checks run in a fixed order, and the first failure is returned:
/// structure, declared algorithm, signature, expiry.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Create a new token validator.
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is empty
    pub fn new(settings: &TokenSettings) -> Result<Self, JwtError> {
        if settings.secret().is_empty() {
            return Err(JwtError::InvalidKey("signing secret is empty".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        // Expiry is compared against the caller's clock in `validate_at`.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(settings.secret()),
            validation,
        })
    }

    /// Validate a token against the current time.
    ///
    /// # Errors
    /// * `MalformedToken` - Not a three-part token or undecodable payload
    /// * `UnexpectedAlgorithm` - Header declares a non-HMAC algorithm
    /// * `InvalidSignature` - Signature does not match the configured secret
    /// * `TokenExpired` - `exp` is at or before now
    pub fn validate(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, JwtError> {
        let declared = declared_algorithm(token)?;

        let algorithm_is_hmac = Algorithm::from_str(&declared)
            .map(|algorithm| HMAC_ALGORITHMS.contains(&algorithm))
            .unwrap_or(false);
        if !algorithm_is_hmac {
            return Err(JwtError::UnexpectedAlgorithm(declared));
        }

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(into_jwt_error)?;

        if token_data.claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}

/// Read the `alg` field from the header segment without trusting anything else.
fn declared_algorithm(token: &str) -> Result<String, JwtError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(JwtError::MalformedToken(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    }
    if segments[0].is_empty() || segments[1].is_empty() {
        return Err(JwtError::MalformedToken("empty header or payload".to_string()));
    }

    let header = URL_SAFE_NO_PAD
        .decode(segments[0])
        .map_err(|e| JwtError::MalformedToken(format!("header is not base64url: {}", e)))?;
    let header: serde_json::Value = serde_json::from_slice(&header)
        .map_err(|e| JwtError::MalformedToken(format!("header is not JSON: {}", e)))?;

    header
        .get("alg")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| JwtError::MalformedToken("header has no alg".to_string()))
}

fn into_jwt_error(error: JsonWebTokenError) -> JwtError {
    match error.kind() {
        ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => JwtError::UnexpectedAlgorithm(error.to_string()),
        ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        _ => JwtError::MalformedToken(error.to_string()),
    }
}
