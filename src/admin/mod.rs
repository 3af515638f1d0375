//! Admin API.
//!
//! Read-only view of the live route table, served on its own listener
//! behind a bearer token.

pub mod auth;
pub mod handlers;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use self::auth::{admin_auth_middleware, AdminKey};
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState, api_key: &str) -> Router {
    let key = AdminKey(Arc::from(api_key));

    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/routes", get(get_routes))
        .route("/admin/routes/warnings", get(get_warnings))
        .route("/admin/routes/tenant/{tenant}", get(get_routes_by_tenant))
        .route("/admin/routes/host/{host}", get(get_routes_by_host))
        .layer(middleware::from_fn_with_state(key, admin_auth_middleware))
        .with_state(state)
}
