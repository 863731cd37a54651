use anyhow::Result;
use odisha_power_forecast::{api, config::Config, context::AppState, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let cfg = Config::load()?;

    // Train before binding: the process never serves an untrained model.
    let state = AppState::new(cfg.clone())?;

    let app = api::router(state, &cfg);
    let addr = cfg.server.socket_addr()?;
    info!(%addr, "starting Odisha power forecast server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}
