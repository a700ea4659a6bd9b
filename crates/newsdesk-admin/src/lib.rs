//! Newsdesk admin server library.
//!
//! HTTP surface of the admin area:
//! - `POST /api/admin/auth` password login, sets the session cookie
//! - `POST /api/admin/logout` clears the session cookie
//! - `GET /api/admin/session` claims of the current session (guarded)
//! - `/{locale}/admin/...` admin pages (guarded, except the login page)
//!
//! Sessions are stateless: see [`newsdesk_auth`].

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

pub mod cookies;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod state;

pub use state::AppState;

/// Build the full admin router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(routes::healthz))
        .merge(routes::api_routes(&state))
        .merge(pages::page_routes(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
