use std::{net::SocketAddr, sync::Arc};

use clap::Parser;
use common::{expirations::JsonFileExpirationStore, tracing::init_tracing};
use expiration_api::{api_state::ExpirationApiState, cli::Cli};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _ = start(cli).await.map_err(|e| {
        tracing::error!("{}", e);
    });
}

async fn start(cli: Cli) -> anyhow::Result<()> {
    init_tracing("info");

    tracing::info!("Cli args: {cli:?}");

    let store = JsonFileExpirationStore::new(cli.expirations_path);
    let state = ExpirationApiState::new(Arc::new(store));

    let app = expiration_api::app(state);

    let socket_addr = SocketAddr::new(cli.host, cli.port);

    tracing::info!("Starting expiration API server on http://{:?}", socket_addr);
    let listener = TcpListener::bind(&socket_addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
