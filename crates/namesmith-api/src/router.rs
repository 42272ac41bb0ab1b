//! Route definitions for the Namesmith HTTP API.
//!
//! Routes are mounted at the root. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::{cors::build_cors_layer, logging::request_logging};
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(root_routes())
        .merge(auth_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Greeting and health endpoints
fn root_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root::index))
        .route("/hello/{name}", get(handlers::root::hello))
        .route("/health", get(handlers::health::health))
}

/// Auth endpoints: code, register, login, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/code", get(handlers::auth::send_code))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}
