//! API error responses.
//!
//! Failures are rendered as `{"error": {"message": ...}}`. Authentication
//! failures share one message so clients cannot tell a missing cookie from a
//! forged or expired one.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use newsdesk_auth::AuthError;
use serde::Serialize;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Password is required")]
    PasswordRequired,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error")]
    Internal(#[from] AuthError),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::PasswordRequired => StatusCode::BAD_REQUEST,
            Self::InvalidPassword | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorMessage<'a>,
}

#[derive(Serialize)]
struct ErrorMessage<'a> {
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(source) = &self {
            error!(error = %source, "Admin request failed");
        }
        let message = self.to_string();
        let body = ErrorBody {
            error: ErrorMessage { message: &message },
        };
        (self.status(), Json(body)).into_response()
    }
}
