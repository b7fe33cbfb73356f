use auth::Role;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Echo the verified identity of the caller.
pub async fn current_session(user: AuthenticatedUser) -> ApiSuccess<SessionData> {
    ApiSuccess::new(
        StatusCode::OK,
        SessionData {
            id: user.user_id.0,
            role: user.role,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionData {
    pub id: i64,
    pub role: Role,
}
