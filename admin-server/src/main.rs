use std::net::SocketAddr;
use std::time::Duration;

use admin_server::editor::SessionConfig;
use admin_server::gateway::{GatewayClient, GatewayConfig};
use admin_server::payments::WatchConfig;
use admin_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "admin_server=info,tower_http=warn".into()),
        )
        .init();

    let base_url = std::env::var("GATEWAY_BASE_URL").unwrap_or_else(|_| {
        tracing::warn!("GATEWAY_BASE_URL not set, using http://localhost:8080");
        "http://localhost:8080".to_string()
    });

    let bind_addr: SocketAddr = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());

    let mut session_config = SessionConfig::default();
    if let Some(secs) = env_u64("SESSION_TTL_SECS") {
        session_config.idle_ttl = Duration::from_secs(secs);
    }
    if let Some(capacity) = env_u64("SESSION_CAPACITY") {
        session_config.max_capacity = capacity;
    }

    let mut watch_config = WatchConfig::default();
    if let Some(secs) = env_u64("WITHDRAW_POLL_SECS") {
        watch_config.poll_interval = Duration::from_secs(secs);
    }

    let gateway = match GatewayClient::new(GatewayConfig::new(&base_url)) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to create gateway client");
            std::process::exit(1);
        }
    };

    let state = AppState::new(gateway, &session_config, watch_config);
    let app = create_router(state, &static_dir);

    tracing::info!(%bind_addr, %base_url, "admin dashboard listening");

    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %bind_addr, "failed to bind");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server exited");
        std::process::exit(1);
    }
}

/// Read a numeric environment variable, warning on unparsable values.
fn env_u64(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(%name, %raw, "ignoring unparsable value");
            None
        }
    }
}
