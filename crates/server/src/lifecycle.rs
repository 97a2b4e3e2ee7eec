use std::net::SocketAddr;

use axum::extract::{ws::WebSocketUpgrade, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::signal;
use tokio::time::interval;
use tracing::info;

use crate::app_state::AppState;
use crate::dispatcher::run_connection;

const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// Builds the single-route router: everything speaks the binary
/// protocol over one WebSocket upgrade endpoint.
pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(upgrade_handler)).with_state(state)
}

/// Starts the listener and the periodic sweeper, and blocks until a
/// shutdown signal arrives.
pub async fn run(state: AppState, host: &str, port: u16) -> std::io::Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse().unwrap_or_else(|_| ([0, 0, 0, 0], port).into());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    serve(listener, state).await
}

/// Runs the sweeper and the accept loop against an already-bound
/// listener, until a shutdown signal arrives. Split out from [`run`]
/// so tests can bind to an ephemeral port and learn the real address.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    let app = router(state.clone());
    let sweeper = tokio::spawn(run_sweeper(state));

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    info!("shutdown complete");
    Ok(())
}

async fn upgrade_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.max_message_size(MAX_MESSAGE_SIZE)
        .on_upgrade(move |socket| async move {
            let Ok(permit) = state.connections.clone().try_acquire_owned() else {
                return;
            };
            run_connection(state, socket).await;
            drop(permit);
        })
}

/// Runs `sweep_expired_sessions`, `sweep_stale_rounds`, and the
/// rate-limiter purge in order, every `cleanup_interval`.
async fn run_sweeper(state: AppState) {
    let mut ticker = interval(state.cleanup_interval);
    loop {
        ticker.tick().await;
        state.store.sweep_expired_sessions();
        state.engine.sweep_stale_rounds(state.stale_round_timeout);
        state.store.rate_limit_evict_idle();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
