use sha2::Digest;
use sha2::Sha512;
use subtle::ConstantTimeEq;

/// Hash a plaintext secret with the given salt.
///
/// Computes SHA-512 over `plaintext || salt` and hex-encodes the digest.
///
/// # Arguments
/// * `plaintext` - Secret to hash (may be empty)
/// * `salt` - Salt bytes appended to the secret
///
/// # Returns
/// Lowercase hex string, 128 characters long
pub fn hash_with_salt(plaintext: &str, salt: &[u8]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(plaintext.as_bytes());
    hasher.update(salt);
    hex::encode(hasher.finalize())
}

/// Compare two password hashes in constant time.
///
/// Length differences return false early; lengths are not secret.
pub fn hashes_match(expected: &str, candidate: &str) -> bool {
    expected.as_bytes().ct_eq(candidate.as_bytes()).into()
}

/// Password hashing implementation.
///
/// Salted SHA-512 with a single salt shared by every user. The salt is
/// supplied once at construction and never changes: changing it invalidates
/// every stored hash.
#[derive(Clone)]
pub struct PasswordHasher {
    salt: Vec<u8>,
}

impl PasswordHasher {
    /// Create a new password hasher bound to the process salt.
    ///
    /// # Arguments
    /// * `salt` - Salt bytes loaded from configuration
    ///
    /// # Returns
    /// PasswordHasher instance
    pub fn new(salt: impl Into<Vec<u8>>) -> Self {
        Self { salt: salt.into() }
    }

    /// Hash a plaintext password for storage or lookup.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// 128-character lowercase hex digest
    pub fn hash(&self, password: &str) -> String {
        hash_with_salt(password, &self.salt)
    }

    /// Verify a password against a stored hash.
    ///
    /// # Arguments
    /// * `hash` - Stored password hash
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn matches(&self, hash: &str, password: &str) -> bool {
        hashes_match(hash, &self.hash(password))
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("salt", &"<redacted>")
            .finish()
    }
}
