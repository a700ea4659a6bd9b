//! Session guard layers for admin routes.
//!
//! Every admin API and page route is wrapped in one of these before any
//! handler runs. On success the verified [`Claims`] are inserted into the
//! request extensions.

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use newsdesk_auth::{Access, Claims, SESSION_COOKIE};
use tracing::debug;

use crate::error::ApiError;
use crate::pages::Locale;
use crate::state::AppState;

fn check(state: &AppState, jar: &CookieJar) -> Access {
    state
        .guard
        .authenticate(jar.get(SESSION_COOKIE).map(|cookie| cookie.value()))
}

/// Reject unauthenticated API requests with `401 Unauthorized`.
pub async fn require_admin_api(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match check(&state, &jar) {
        Access::Allowed(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Access::Denied => {
            debug!(path = %request.uri().path(), "Rejected unauthenticated admin API request");
            ApiError::Unauthorized.into_response()
        }
    }
}

/// Redirect unauthenticated page requests to the login page of their locale.
pub async fn require_admin_page(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match check(&state, &jar) {
        Access::Allowed(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Access::Denied => {
            let locale = Locale::from_path(request.uri().path());
            debug!(path = %request.uri().path(), "Redirecting unauthenticated admin page request");
            Redirect::to(&locale.login_path()).into_response()
        }
    }
}

/// Put every route of `router` behind [`require_admin_api`].
pub fn protect_api(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_admin_api,
    ))
}

/// Put every route of `router` behind [`require_admin_page`].
pub fn protect_pages(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_admin_page,
    ))
}

/// Claims attached by the guard layers, if the request passed one.
pub fn request_claims(request: &Request) -> Option<&Claims> {
    request.extensions().get::<Claims>()
}
