use chrono::Duration;

/// Secrets and limits shared by the password hasher and the token codec.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AuthSettings {
    /// HMAC key for signing tokens
    pub signing_key: Vec<u8>,
    /// Salt mixed into every password hash
    pub salt: Vec<u8>,
    /// Lifetime of an issued token
    pub token_ttl: Duration,
}

impl AuthSettings {
    /// Default token lifetime.
    pub const DEFAULT_TTL_MINUTES: i64 = 30;

    /// Longest token lifetime accepted from configuration (one week).
    pub const MAX_TTL_MINUTES: i64 = 7 * 24 * 60;

    pub fn new(
        signing_key: impl Into<Vec<u8>>,
        salt: impl Into<Vec<u8>>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            signing_key: signing_key.into(),
            salt: salt.into(),
            token_ttl,
        }
    }
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("signing_key", &"<redacted>")
            .field("salt", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
