//! Newsdesk admin server
//!
//! Serves the admin login/logout API and the session-guarded admin area.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use newsdesk_admin::{AppState, build_router};
use newsdesk_core::AdminConfig;
use newsdesk_core::config::load_config;
use newsdesk_core::tracing_init::{LogFormat, init_tracing};

#[derive(Parser)]
#[command(name = "newsdesk-admin")]
#[command(version, about = "Newsdesk admin server - password login and session-guarded admin area")]
struct Args {
    /// Optional JSON settings file; environment and flags override it.
    #[arg(long, env = "NEWSDESK_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on (default 0.0.0.0:8080).
    #[arg(long, env = "LISTEN_ADDR")]
    addr: Option<SocketAddr>,

    /// Admin login password.
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    /// Session signing secret, at least 32 characters.
    #[arg(long, env = "ADMIN_SECRET", hide_env_values = true)]
    admin_secret: Option<String>,

    /// Mark the session cookie `Secure`. Enable behind HTTPS.
    #[arg(
        long,
        env = "ADMIN_SECURE_COOKIES",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    secure_cookies: Option<bool>,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn overrides(&self) -> AdminConfig {
        AdminConfig {
            admin_password: self.admin_password.clone(),
            admin_secret: self.admin_secret.clone(),
            listen_addr: self.addr,
            secure_cookies: self.secure_cookies,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(
        "newsdesk_admin=info,tower_http=info",
        LogFormat::from_json_flag(args.log_json),
    )?;

    let config = load_config(args.config.as_deref(), args.overrides())?;
    let state = AppState::from_config(&config)?;
    let addr = config.listen_addr();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %addr,
        secure_cookies = config.secure_cookies(),
        "Starting newsdesk-admin"
    );
    if !config.secure_cookies() {
        warn!("Session cookie is not marked Secure; enable --secure-cookies behind HTTPS");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Admin server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
