use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::Role;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::session::current_session;
use super::middleware::authenticate;
use super::middleware::require_role;
use super::middleware::RoleGate;
use crate::domain::user::ports::AuthServicePort;

/// Handler state. The authenticator lives in the route layers.
pub struct AppState<S: AuthServicePort> {
    pub auth_service: Arc<S>,
}

impl<S: AuthServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
        }
    }
}

/// Put a router behind token authentication.
pub fn protected<T>(router: Router<T>, authenticator: Arc<Authenticator>) -> Router<T>
where
    T: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(authenticator, authenticate))
}

/// Put a router behind token authentication limited to one role.
pub fn restricted<T>(router: Router<T>, authenticator: Arc<Authenticator>, role: Role) -> Router<T>
where
    T: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(
        RoleGate {
            authenticator,
            required: role,
        },
        require_role,
    ))
}

pub fn create_router<S: AuthServicePort>(
    auth_service: Arc<S>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState { auth_service };

    let public_routes = Router::<AppState<S>>::new()
        .route("/api/auth/login", post(login::<S>))
        .route("/api/auth/registry", post(register::<S>));

    let account_routes = protected(
        Router::<AppState<S>>::new().route("/api/account", get(current_session)),
        Arc::clone(&authenticator),
    );

    let admin_routes = restricted(
        Router::<AppState<S>>::new().route("/api/admin/session", get(current_session)),
        Arc::clone(&authenticator),
        Role::Admin,
    );

    let doctor_routes = restricted(
        Router::<AppState<S>>::new().route("/api/doctor/session", get(current_session)),
        Arc::clone(&authenticator),
        Role::Doctor,
    );

    let patient_routes = restricted(
        Router::<AppState<S>>::new().route("/api/patient/session", get(current_session)),
        authenticator,
        Role::Patient,
    );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(account_routes)
        .merge(admin_routes)
        .merge(doctor_routes)
        .merge(patient_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
