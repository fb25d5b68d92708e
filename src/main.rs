use anyhow::Result;
use bess_quote_builder::{api, config::Config, repo::Repositories, telemetry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let cfg = Config::load()?;
    let repos = Repositories::new(&cfg).await?;
    let state = api::AppState::from_config(&cfg, repos)?;
    let app = api::router(state, &cfg)?;

    let addr = cfg.server.socket_addr()?;
    if cfg.server.host == "0.0.0.0" {
        warn!("server binding to 0.0.0.0; the admin constants endpoints have no auth in front of them");
    }
    info!(%addr, source = ?cfg.constants.source, "starting BESS quote builder");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
