use std::time::{Duration, Instant};

use axum::extract::ws::{Message, WebSocket};
use dicecade_protocol::{CommandId, ErrorCode, Frame, FrameError};
use dicecade_state::ConnectionId;
use futures_util::{SinkExt, StreamExt};
use tokio::time::interval;
use tracing::{error, info, warn};

use crate::app_state::AppState;
use crate::handlers;

/// Application-level keep-alive: a `Ping` goes out this often, and the
/// connection is dropped if no `Pong` has arrived within `PING_TIMEOUT`.
const PING_INTERVAL: Duration = Duration::from_secs(20);
const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-connection state, held for the lifetime of one socket: an
/// `authenticated` flag, the bound `user_id` (0 before login), and a
/// handle back into the shared state store.
pub struct ConnState {
    pub authenticated: bool,
    pub user_id: u32,
    pub conn_id: ConnectionId,
}

/// Drives one client's receive loop: frame decode, rate-limit gate,
/// auth gate, dispatch, write-back, plus the ping/pong keep-alive timer.
/// Runs until the socket closes or the peer goes silent, at which point
/// the connection is unbound unconditionally.
pub async fn run_connection(state: AppState, socket: WebSocket) {
    let conn_id = state.mint_connection_id();
    let mut conn = ConnState { authenticated: false, user_id: 0, conn_id };
    let (mut sink, mut stream) = socket.split();

    let mut ping_ticker = interval(PING_INTERVAL);
    let mut last_pong = Instant::now();

    loop {
        tokio::select! {
            message = stream.next() => {
                let Some(message) = message else { break };
                let message = match message {
                    Ok(m) => m,
                    Err(e) => {
                        warn!(conn_id = conn_id.0, error = %e, "socket read failed");
                        break;
                    }
                };

                let raw = match message {
                    Message::Binary(bytes) => bytes,
                    Message::Close(_) => break,
                    Message::Pong(_) => {
                        last_pong = Instant::now();
                        continue;
                    }
                    Message::Ping(_) => continue,
                    Message::Text(_) => {
                        let frame = handlers::error_frame(ErrorCode::InvalidFormat, "text frames are not accepted");
                        if send(&mut sink, frame).await.is_err() {
                            break;
                        }
                        continue;
                    }
                };

                let frame = match Frame::decode(&raw) {
                    Ok(f) => f,
                    Err(FrameError::TooShort) | Err(FrameError::LengthMismatch { .. }) => {
                        let err = handlers::error_frame(ErrorCode::InvalidFormat, "declared length does not match payload");
                        if send(&mut sink, err).await.is_err() {
                            break;
                        }
                        continue;
                    }
                };

                if conn.authenticated && !state.store.rate_limit_check(conn.user_id) {
                    let err = handlers::error_frame(ErrorCode::RateLimit, "rate limit exceeded");
                    if send(&mut sink, err).await.is_err() {
                        break;
                    }
                    continue;
                }

                let response = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    dispatch(&state, &mut conn, frame)
                })) {
                    Ok(frame) => frame,
                    Err(_) => {
                        error!(conn_id = conn_id.0, "handler panicked, converting to SERVER_ERROR");
                        handlers::error_frame(ErrorCode::ServerError, "internal error")
                    }
                };
                if send(&mut sink, response).await.is_err() {
                    break;
                }
            }
            _ = ping_ticker.tick() => {
                if last_pong.elapsed() > PING_TIMEOUT {
                    warn!(conn_id = conn_id.0, "no pong within timeout, closing connection");
                    break;
                }
                if sink.send(Message::Ping(Vec::new())).await.is_err() {
                    break;
                }
            }
        }
    }

    handlers::handle_disconnect(&state, conn_id);
    info!(conn_id = conn_id.0, "connection closed");
}

fn dispatch(state: &AppState, conn: &mut ConnState, frame: Frame) -> Frame {
    let Some(cmd_id) = CommandId::from_u32(frame.cmd_id) else {
        return handlers::error_frame(ErrorCode::InvalidFormat, "unknown command id");
    };

    let requires_auth = !matches!(cmd_id, CommandId::LoginReq);
    if requires_auth && !conn.authenticated {
        return handlers::error_frame(ErrorCode::AuthRequired, "authentication required");
    }

    match cmd_id {
        CommandId::LoginReq => handlers::handle_login(state, conn, &frame.body),
        CommandId::RoomJoinReq => handlers::handle_room_join(state, conn, &frame.body),
        CommandId::SnapshotReq => handlers::handle_snapshot(state, conn, &frame.body),
        CommandId::BetPlacementReq => handlers::handle_bet_placement(state, conn, &frame.body),
        CommandId::BetFinishedReq => handlers::handle_bet_finished(state, conn, &frame.body),
        CommandId::ReckonResultReq => handlers::handle_reckon_result(state, conn, &frame.body),
        _ => handlers::error_frame(ErrorCode::InvalidFormat, "not a client-to-server command"),
    }
}

async fn send(
    sink: &mut futures_util::stream::SplitSink<WebSocket, Message>,
    frame: Frame,
) -> Result<(), axum::Error> {
    sink.send(Message::Binary(frame.encode())).await
}
