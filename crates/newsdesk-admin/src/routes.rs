//! Admin API handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use axum_extra::extract::CookieJar;
use newsdesk_auth::Claims;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::cookies::{cleared_session_cookie, session_cookie};
use crate::error::ApiError;
use crate::middleware::protect_api;
use crate::state::AppState;

/// Success envelope: `{"data": ...}`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Data<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ack {
    pub ok: bool,
}

impl Data<Ack> {
    pub const fn ok() -> Self {
        Self {
            data: Ack { ok: true },
        }
    }
}

/// Login body. `password` is kept as raw JSON so that a present but
/// non-string value counts as a wrong password rather than a missing one.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<Value>,
}

/// What the login body offered as a password.
#[derive(Debug, PartialEq, Eq)]
enum Candidate {
    /// Unparsable body, or a password that is absent, `null`, `""`, `false` or `0`.
    Missing,
    Text(String),
    /// Any other JSON value; never equal to the configured password.
    Other,
}

impl Candidate {
    /// Read the candidate from a raw request body, whatever its content type.
    fn from_body(body: &[u8]) -> Self {
        let Ok(LoginRequest { password }) = serde_json::from_slice(body) else {
            return Self::Missing;
        };
        match password {
            None | Some(Value::Null | Value::Bool(false)) => Self::Missing,
            Some(Value::String(s)) if s.is_empty() => Self::Missing,
            Some(Value::String(s)) => Self::Text(s),
            Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f.abs() < f64::MIN_POSITIVE) => {
                Self::Missing
            }
            Some(_) => Self::Other,
        }
    }
}

/// Timestamps of the current session, in unix seconds.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Login, logout and the guarded session endpoint.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let guarded = protect_api(
        Router::new().route("/api/admin/session", get(session)),
        state,
    );

    Router::new()
        .route("/api/admin/auth", post(login))
        .route("/api/admin/logout", post(logout))
        .merge(guarded)
}

/// `POST /api/admin/auth` -- exchange the admin password for a session cookie.
///
/// The body is parsed as JSON regardless of `Content-Type`. An unparsable
/// body is treated like a missing password.
#[instrument(skip_all, fields(route = "login"))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<Data<Ack>>), ApiError> {
    let accepted = match Candidate::from_body(&body) {
        Candidate::Missing => return Err(ApiError::PasswordRequired),
        Candidate::Text(password) => state.password.matches(&password),
        Candidate::Other => false,
    };

    if !accepted {
        warn!("Failed admin login attempt");
        return Err(ApiError::InvalidPassword);
    }

    let token = state.guard.signer().issue()?;
    info!("Admin logged in");

    Ok((
        jar.add(session_cookie(token, state.secure_cookies)),
        Json(Data::ok()),
    ))
}

/// `POST /api/admin/logout` -- tell the client to drop the session cookie.
///
/// Nothing is revoked server-side; a client that keeps the old token can
/// still use it until it expires.
#[instrument(skip_all, fields(route = "logout"))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Data<Ack>>) {
    info!("Admin logged out");
    (jar.add(cleared_session_cookie()), Json(Data::ok()))
}

/// `GET /api/admin/session`
pub async fn session(Extension(claims): Extension<Claims>) -> Json<Data<SessionInfo>> {
    Json(Data {
        data: SessionInfo {
            issued_at: claims.issued_at(),
            expires_at: claims.expires_at(),
        },
    })
}

/// `GET /healthz`
pub async fn healthz() -> &'static str {
    "ok"
}
