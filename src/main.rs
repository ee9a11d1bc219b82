//! Production data API binary entry point.

use anyhow::Result;
use as400_production_api::{
    config::{ConnectionConfigBuilder, ServerConfig},
    database::OdbcDatabase,
    server::{build_router, AppState},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let connection = ConnectionConfigBuilder::new().from_env()?.build()?;
    let server = ServerConfig::from_env();

    info!(
        host = %connection.host,
        library = %connection.library,
        "AS/400 target configured"
    );

    let state = AppState::new(Arc::new(OdbcDatabase::new(connection)), &server);
    let app = build_router(state);

    let address = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install shutdown handler: {err}");
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("as400_production_api=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
