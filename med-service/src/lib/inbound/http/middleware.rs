use std::sync::Arc;

use auth::Authenticator;
use auth::JwtError;
use auth::Role;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;

const BEARER_SCHEME: &str = "Bearer";

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: Role,
}

/// Reasons a request is refused by the access middleware.
///
/// Every variant is answered with 401 and its message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MalformedHeader,

    #[error("Token is empty")]
    EmptyToken,

    #[error("{0}")]
    InvalidToken(#[from] JwtError),

    #[error("Insufficient permissions: {required} role required")]
    InsufficientPermissions { required: Role },
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        ApiError::Unauthorized(self.to_string()).into_response()
    }
}

/// State for routes limited to a single role.
#[derive(Clone)]
pub struct RoleGate {
    pub authenticator: Arc<Authenticator>,
    pub required: Role,
}

/// Middleware that validates the bearer token and adds the caller to request extensions
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AccessError> {
    let user = authorize(&authenticator, req.headers(), None)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Middleware that additionally requires the caller to hold the gate's role
pub async fn require_role(
    State(gate): State<RoleGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AccessError> {
    let user = authorize(&gate.authenticator, req.headers(), Some(gate.required))?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Run the full check on a set of request headers.
///
/// # Arguments
/// * `authenticator` - Token validator
/// * `headers` - Request headers
/// * `required` - Role the route demands, if any
///
/// # Errors
/// * `MissingHeader` / `MalformedHeader` / `EmptyToken` - Bad Authorization header
/// * `InvalidToken` - Token failed validation
/// * `InsufficientPermissions` - Role does not match `required`
pub fn authorize(
    authenticator: &Authenticator,
    headers: &HeaderMap,
    required: Option<Role>,
) -> Result<AuthenticatedUser, AccessError> {
    let token = extract_token_from_header(headers).map_err(|e| {
        tracing::warn!(error = %e, "Rejected Authorization header");
        e
    })?;

    let identity = authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        AccessError::from(e)
    })?;

    if let Some(required) = required {
        if identity.role != required {
            tracing::warn!(
                user_id = identity.user_id,
                role = %identity.role,
                required = %required,
                "Role not permitted"
            );
            return Err(AccessError::InsufficientPermissions { required });
        }
    }

    Ok(AuthenticatedUser {
        user_id: UserId(identity.user_id),
        role: identity.role,
    })
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The header is split on single spaces and must yield exactly the scheme
/// and the token. A header holding only the scheme counts as an empty token,
/// since HTTP parsers strip the trailing space of `Bearer `.
pub fn extract_token_from_header(headers: &HeaderMap) -> Result<&str, AccessError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .filter(|value| !value.is_empty())
        .ok_or(AccessError::MissingHeader)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AccessError::MalformedHeader)?;

    let parts: Vec<&str> = auth_str.split(' ').collect();
    match parts.as_slice() {
        [scheme] if *scheme == BEARER_SCHEME => Err(AccessError::EmptyToken),
        [scheme, _] if *scheme != BEARER_SCHEME => Err(AccessError::MalformedHeader),
        [_, token] if token.is_empty() => Err(AccessError::EmptyToken),
        [_, token] => Ok(*token),
        _ => Err(AccessError::MalformedHeader),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AccessError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only the middleware inserts this; without it the route is closed
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(AccessError::MissingHeader)
    }
}
