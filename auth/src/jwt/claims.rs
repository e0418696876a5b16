use chrono::DateTime;
use chrono::Duration;
use chrono::Timelike;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity a token is issued for: an opaque subject id plus an email.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal {
    pub id: String,
    pub email: String,
}

impl Principal {
    pub fn new(id: impl ToString, email: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            email: email.into(),
        }
    }
}

/// Claims carried by every access token.
///
/// Timestamps are Unix seconds. `authorized` is always `true` on issued
/// tokens; it is kept in the payload for clients that inspect it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (principal identifier)
    pub sub: String,

    /// Subject email
    pub email: String,

    pub authorized: bool,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for a principal, valid from `issued_at` for `validity`.
    ///
    /// # Returns
    /// Claims, or `None` if the expiry does not fit in a timestamp
    pub fn for_principal(
        principal: &Principal,
        issuer: &str,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Option<Self> {
        // Claims carry whole seconds; drop the fraction so `exp - iat == validity`.
        let issued_at = issued_at.with_nanosecond(0)?;
        let expiration = issued_at.checked_add_signed(validity)?;

        Some(Self {
            sub: principal.id.clone(),
            email: principal.email.clone(),
            authorized: true,
            iss: issuer.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Principal the token was issued for.
    pub fn principal(&self) -> Principal {
        Principal::new(&self.sub, self.email.clone())
    }

    /// Check if token is expired.
    ///
    /// A token stops being valid at the exact second of `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
