use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Identity;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::CredentialStore;

/// Domain service implementation for registration and login.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthenticationService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<CS> AuthenticationService<CS>
where
    CS: CredentialStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Password hasher and token codec
    ///
    /// # Returns
    /// Configured authentication service instance
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthenticationService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<UserId, UserError> {
        let password_hash = self.authenticator.hash_password(&command.password);

        let user_id = self
            .store
            .create_user(&command.email, &password_hash, command.role)
            .await
            .map_err(|e| {
                tracing::warn!(email = %command.email, error = %e, "Registration failed");
                e
            })?;

        tracing::info!(user_id = %user_id, role = %command.role, "User registered");

        Ok(user_id)
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, UserError> {
        let candidate_hash = self.authenticator.hash_password(password);

        let user = self
            .store
            .find_user_by_credential(email, &candidate_hash)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Login rejected: invalid credentials");
                UserError::InvalidCredentials
            })?;

        let token = self
            .authenticator
            .issue_token(&Identity::new(user.id.0, user.role))
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Token issuance failed");
                UserError::from(e)
            })?;

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(token)
    }
}
