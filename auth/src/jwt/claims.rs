use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;
use crate::identity::Identity;
use crate::identity::Role;

/// Claims carried in the token payload.
///
/// Wire shape: `{"id": 7, "role": "doctor", "iat": 1700000000, "exp": 1700001800}`.
/// The role stays a raw string on the wire so unknown values can be
/// rejected explicitly after the signature has been verified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// User identifier
    pub id: i64,

    /// Role name
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Create claims for an identity.
    ///
    /// # Arguments
    /// * `identity` - Principal to embed
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Errors
    /// * `EncodingFailed` - `issued_at + ttl` is outside the representable range
    pub fn for_identity(
        identity: &Identity,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::EncodingFailed(format!("token lifetime {} overflows the expiry", ttl))
        })?;

        Ok(Self {
            id: identity.user_id,
            role: identity.role.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Check if token is expired. A token expiring exactly now is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Check if token was issued in the future.
    pub fn is_premature(&self, current_timestamp: i64) -> bool {
        current_timestamp < self.iat
    }

    /// Convert the claims into a verified identity.
    ///
    /// # Errors
    /// * `UnknownRole` - Role is not admin, doctor or patient
    pub fn identity(&self) -> Result<Identity, JwtError> {
        let role = self
            .role
            .parse::<Role>()
            .map_err(|e| JwtError::UnknownRole(e.0))?;

        Ok(Identity::new(self.id, role))
    }
}
