use clap::Parser;
use tracing_subscriber::EnvFilter;

use dicecade_server::{lifecycle, AppState, Config};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    let state = AppState::new(&config);

    if let Err(e) = lifecycle::run(state, &config.host, config.port).await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}
