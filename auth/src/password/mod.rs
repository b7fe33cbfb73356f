pub mod sha512;

pub use sha512::hash_with_salt;
pub use sha512::hashes_match;
pub use sha512::PasswordHasher;
