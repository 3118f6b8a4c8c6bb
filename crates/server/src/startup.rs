use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StoreBackend};
use dotenvy::dotenv;
use service::contact::{repository::ExpiryPolicy, service::ContactService};
use service::qr::{QrOptions, QrService, SvgQrEncoder};
use service::storage::{self, Backend};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the repository backend, contact service and QR generator from config.
pub fn build_state(cfg: &AppConfig) -> ServerState {
    let backend = match cfg.store.backend {
        StoreBackend::Memory => Backend::Memory,
        StoreBackend::Moka => Backend::Moka,
    };
    let repo = storage::build_repository(backend, ExpiryPolicy::new(cfg.store.ttl()));
    let contacts = ContactService::with_capacity(repo, cfg.store.max_contacts);
    let qr = QrService::new(
        Arc::new(SvgQrEncoder),
        QrOptions { width: cfg.qr.width, height: cfg.qr.height, margin: cfg.qr.margin },
    );
    info!(
        backend = ?cfg.store.backend,
        ttl_secs = cfg.store.ttl_secs,
        max_contacts = cfg.store.max_contacts,
        "contact store configured"
    );
    ServerState { contacts: Arc::new(contacts), qr: Arc::new(qr) }
}

pub fn build_app(cfg: &AppConfig) -> Router {
    routes::build_router(build_state(cfg), build_cors())
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Serve the app on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg);
    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting contact card server");
    let listener = TcpListener::bind(addr).await?;
    serve(listener, app, shutdown_signal()).await
}

/// Public entry: load config, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_env()?;
    run_with_config(cfg).await
}
