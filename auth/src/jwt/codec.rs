use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::TokenClaims;
use super::errors::JwtError;
use crate::identity::Identity;

/// Algorithms accepted on validation. Anything outside the HMAC family is
/// rejected before the signature is looked at.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Token encoder/decoder for identity tokens.
///
/// Issues HS256-signed JWTs carrying `{id, role, iat, exp}` and validates
/// them back into an [`Identity`]. Key material and TTL are fixed at
/// construction.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

#[derive(Deserialize)]
struct RawHeader {
    alg: Option<String>,
}

impl TokenCodec {
    /// Create a new token codec with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `ttl` - Lifetime of issued tokens
    ///
    /// # Returns
    /// TokenCodec instance configured with HS256 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Lifetime applied to issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for an identity, valid from now until now + TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, identity: &Identity) -> Result<String, JwtError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry overflows, or token encoding failed
    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);
        let claims = TokenClaims::for_identity(identity, now, self.ttl)?;

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and extract its identity.
    ///
    /// # Errors
    /// * `MalformedToken` - Not three segments, or undecodable header/payload
    /// * `UnsupportedAlgorithm` - Header declares a non-HMAC algorithm
    /// * `InvalidSignature` - Signature does not match
    /// * `Expired` - Current time is at or past `exp`
    /// * `NotYetValid` - Current time is before `iat`
    /// * `UnknownRole` - Role claim is not a known role
    pub fn validate(&self, token: &str) -> Result<Identity, JwtError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, JwtError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(JwtError::MalformedToken(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        }

        check_algorithm(segments[0])?;

        let mut validation = Validation::new(self.algorithm);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        // Time checks are done below against the caller's clock
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    ErrorKind::InvalidAlgorithm => {
                        JwtError::UnsupportedAlgorithm("algorithm not accepted".to_string())
                    }
                    _ => JwtError::MalformedToken(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        let now = now.timestamp();

        if claims.is_expired(now) {
            return Err(JwtError::Expired);
        }

        if claims.is_premature(now) {
            return Err(JwtError::NotYetValid);
        }

        claims.identity()
    }
}

/// Reject any declared algorithm outside the HMAC family, including `none`.
fn check_algorithm(encoded_header: &str) -> Result<(), JwtError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded_header)
        .map_err(|e| JwtError::MalformedToken(format!("header is not base64url: {}", e)))?;

    let header: RawHeader = serde_json::from_slice(&bytes)
        .map_err(|e| JwtError::MalformedToken(format!("header is not valid JSON: {}", e)))?;

    match header.alg.as_deref() {
        Some("HS256") | Some("HS384") | Some("HS512") => Ok(()),
        Some(other) => Err(JwtError::UnsupportedAlgorithm(other.to_string())),
        None => Err(JwtError::MalformedToken("header has no alg".to_string())),
    }
}
