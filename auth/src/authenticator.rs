use crate::identity::Identity;
use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::password::PasswordHasher;
use crate::settings::AuthSettings;

/// Authentication coordinator combining password hashing and token handling.
///
/// Built once from [`AuthSettings`] and shared read-only by every request.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `settings` - Signing key, salt and token TTL
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            password_hasher: PasswordHasher::new(settings.salt.clone()),
            token_codec: TokenCodec::new(&settings.signing_key, settings.token_ttl),
        }
    }

    /// Hash a password for storage or credential lookup.
    pub fn hash_password(&self, password: &str) -> String {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.matches(stored_hash, password)
    }

    /// Issue a signed token for a verified identity.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, identity: &Identity) -> Result<String, JwtError> {
        self.token_codec.issue(identity)
    }

    /// Validate a token and return the identity it carries.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Identity, JwtError> {
        self.token_codec.validate(token)
    }

    /// Access the underlying token codec.
    pub fn token_codec(&self) -> &TokenCodec {
        &self.token_codec
    }
}
