//! Authentication utilities library
//!
//! Provides the authentication core for the medical records service:
//! - Salted SHA-512 password hashing
//! - HS256 identity tokens (JWT) with a fixed lifetime
//! - Closed role set and the verified [`Identity`]
//! - Authentication coordination via [`Authenticator`]
//!
//! All secrets arrive through [`AuthSettings`]; nothing is read from the
//! environment here.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(b"process-salt".to_vec());
//! let hash = hasher.hash("my_password");
//! assert_eq!(hash.len(), 128);
//! assert!(hasher.matches(&hash, "my_password"));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Identity, Role, TokenCodec};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(30));
//! let token = codec.issue(&Identity::new(1, Role::Doctor)).unwrap();
//! let identity = codec.validate(&token).unwrap();
//! assert_eq!(identity.role, Role::Doctor);
//! ```
//!
//! ## Complete Flow
//! ```
//! use auth::{AuthSettings, Authenticator, Identity, Role};
//! use chrono::Duration;
//!
//! let settings = AuthSettings::new(
//!     b"secret_key_at_least_32_bytes_long!".to_vec(),
//!     b"process-salt".to_vec(),
//!     Duration::minutes(30),
//! );
//! let auth = Authenticator::new(&settings);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123");
//!
//! // Login: verify and issue token
//! assert!(auth.verify_password("password123", &hash));
//! let token = auth.issue_token(&Identity::new(1, Role::Patient)).unwrap();
//!
//! // Validate token
//! let identity = auth.validate_token(&token).unwrap();
//! assert_eq!(identity.user_id, 1);
//! ```

pub mod authenticator;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod settings;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use identity::Identity;
pub use identity::Role;
pub use identity::RoleError;
pub use jwt::JwtError;
pub use jwt::TokenClaims;
pub use jwt::TokenCodec;
pub use password::PasswordHasher;
pub use settings::AuthSettings;
