use async_trait::async_trait;
use auth::Role;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated email, plaintext password and role
    ///
    /// # Returns
    /// Identifier of the created user
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<UserId, UserError>;

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `email` - Email as typed by the client
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `InvalidCredentials` - No user with this email and password
    /// * `TokenIssuanceFailed` - Token could not be signed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, email: &str, password: &str) -> Result<String, UserError>;
}

/// Persistence of user credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new user. Receives the password hash, never the plaintext.
    ///
    /// # Arguments
    /// * `email` - Email address (unique)
    /// * `password_hash` - Hashed password
    /// * `role` - Role granted to the user
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_user(
        &self,
        email: &EmailAddress,
        password_hash: &str,
        role: Role,
    ) -> Result<UserId, UserError>;

    /// Look up a user matching both email and password hash.
    ///
    /// # Arguments
    /// * `email` - Email address, compared case-sensitively
    /// * `password_hash` - Hash of the candidate password
    ///
    /// # Returns
    /// Optional user (None if either field does not match)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_user_by_credential(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, UserError>;
}
