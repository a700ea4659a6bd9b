//! Admin page routes.
//!
//! Pages are locale-prefixed (`/{locale}/admin/...`). Only the login page is
//! reachable without a session; the rest redirect to it. The markup is a bare
//! shell for the client-side admin UI.

use std::fmt;
use std::str::FromStr;

use axum::Router;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;

use crate::middleware::protect_pages;
use crate::state::AppState;

/// Supported UI locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Ko,
    En,
    Zh,
}

impl Locale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// Locale named by the first segment of `path`, else the default.
    pub fn from_path(path: &str) -> Self {
        path.trim_start_matches('/')
            .split('/')
            .next()
            .and_then(|segment| segment.parse().ok())
            .unwrap_or_default()
    }

    pub fn login_path(self) -> String {
        format!("/{self}/admin/login")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ko" => Ok(Self::Ko),
            "en" => Ok(Self::En),
            "zh" => Ok(Self::Zh),
            _ => Err(()),
        }
    }
}

/// Admin sections behind the session guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Home,
    SendHistory,
    Subscribers,
}

impl Section {
    const fn slug(self) -> &'static str {
        match self {
            Self::Home => "",
            Self::SendHistory => "send-history",
            Self::Subscribers => "subscribers",
        }
    }
}

pub fn page_routes(state: &AppState) -> Router<AppState> {
    let guarded = protect_pages(
        Router::new()
            .route("/{locale}/admin", get(home))
            .route("/{locale}/admin/send-history", get(send_history))
            .route("/{locale}/admin/subscribers", get(subscribers)),
        state,
    );

    Router::new()
        .route("/{locale}/admin/login", get(login_page))
        .merge(guarded)
}

async fn home(Path(locale): Path<String>) -> Response {
    render_section(&locale, Section::Home)
}

async fn send_history(Path(locale): Path<String>) -> Response {
    render_section(&locale, Section::SendHistory)
}

async fn subscribers(Path(locale): Path<String>) -> Response {
    render_section(&locale, Section::Subscribers)
}

async fn login_page(Path(locale): Path<String>) -> Response {
    let Ok(locale) = locale.parse::<Locale>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="{locale}">
<head><meta charset="utf-8"><title>Admin Login</title></head>
<body>
<form id="admin-login" data-endpoint="/api/admin/auth" data-next="/{locale}/admin">
  <input type="password" name="password" autocomplete="current-password" required>
  <button type="submit">Login</button>
</form>
</body>
</html>"#
    ))
    .into_response()
}

fn render_section(locale: &str, section: Section) -> Response {
    let Ok(locale) = locale.parse::<Locale>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    Html(admin_shell(locale, section)).into_response()
}

fn admin_shell(locale: Locale, section: Section) -> String {
    let slug = section.slug();
    format!(
        r#"<!DOCTYPE html>
<html lang="{locale}">
<head><meta charset="utf-8"><title>Admin</title></head>
<body>
<nav>
  <a href="/{locale}/admin/send-history">Send History</a>
  <a href="/{locale}/admin/subscribers">Subscribers</a>
  <a href="/{locale}">Back to Site</a>
  <form method="post" action="/api/admin/logout" data-next="{login}"><button>Logout</button></form>
</nav>
<main id="admin-root" data-section="{slug}"></main>
</body>
</html>"#,
        login = locale.login_path(),
    )
}
