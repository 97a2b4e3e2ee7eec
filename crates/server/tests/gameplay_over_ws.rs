use std::time::Duration;

use dicecade_protocol::messages::{
    BetPlacementReq, BetPlacementRsp, ErrorRsp, LoginReq, LoginRsp, ReckonResultReq, ReckonResultRsp,
    RoomJoinReq, RoomJoinRsp,
};
use dicecade_protocol::{CommandId, Frame};
use dicecade_server::{lifecycle, AppState, Config};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::MaybeTlsStream;

type WsStream = tokio_tungstenite::WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        max_connections: 10,
        session_timeout: 1800,
        stale_round_timeout: 600,
        cleanup_interval: 300,
        rate_limit_per_minute: 100,
    }
}

/// Binds an ephemeral listener and spawns the server against it. The
/// server task is detached; it's reaped when the test process exits.
async fn spawn_server() -> String {
    let config = test_config();
    let state = AppState::new(&config);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(lifecycle::serve(listener, state));
    tokio::time::sleep(Duration::from_millis(20)).await;
    format!("ws://{addr}/")
}

async fn connect(url: &str) -> WsStream {
    let (ws, _) = tokio_tungstenite::connect_async(url).await.expect("connect");
    ws
}

async fn send_frame(ws: &mut WsStream, cmd: CommandId, body: Vec<u8>) {
    let frame = Frame::new(cmd.as_u32(), body);
    ws.send(Message::Binary(frame.encode())).await.expect("send frame");
}

async fn recv_frame(ws: &mut WsStream) -> Frame {
    loop {
        match ws.next().await.expect("stream closed unexpectedly").expect("websocket error") {
            Message::Binary(bytes) => return Frame::decode(&bytes).expect("valid frame"),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected message: {other:?}"),
        }
    }
}

async fn login(ws: &mut WsStream, username: &str, password: &str) -> LoginRsp {
    send_frame(
        ws,
        CommandId::LoginReq,
        LoginReq { username: username.to_string(), password: password.to_string() }.encode(),
    )
    .await;
    let frame = recv_frame(ws).await;
    LoginRsp::decode(&frame.body).expect("login response decodes")
}

#[tokio::test]
async fn login_then_join_room_then_bet_then_settle() {
    let url = spawn_server().await;
    let mut ws = connect(&url).await;

    let login_rsp = login(&mut ws, "alice", "alicepass").await;
    assert!(login_rsp.success);
    assert_eq!(login_rsp.balance, 1000);

    send_frame(&mut ws, CommandId::RoomJoinReq, RoomJoinReq { room_id: 1 }.encode()).await;
    let frame = recv_frame(&mut ws).await;
    assert_eq!(frame.cmd_id, CommandId::RoomJoinRsp.as_u32());
    let join_rsp = RoomJoinRsp::decode(&frame.body).unwrap();
    assert!(join_rsp.success);

    send_frame(
        &mut ws,
        CommandId::BetPlacementReq,
        BetPlacementReq { dice_face: 3, amount: 50, round_id: String::new() }.encode(),
    )
    .await;
    let frame = recv_frame(&mut ws).await;
    assert_eq!(frame.cmd_id, CommandId::BetPlacementRsp.as_u32());
    let bet_rsp = BetPlacementRsp::decode(&frame.body).unwrap();
    assert!(bet_rsp.success);
    assert_eq!(bet_rsp.remaining_balance, 950);

    send_frame(
        &mut ws,
        CommandId::ReckonResultReq,
        ReckonResultReq { round_id: bet_rsp.round_id.clone() }.encode(),
    )
    .await;
    let frame = recv_frame(&mut ws).await;
    assert_eq!(frame.cmd_id, CommandId::ReckonResultRsp.as_u32());
    let settle_rsp = ReckonResultRsp::decode(&frame.body).unwrap();
    assert_eq!(settle_rsp.round_id, bet_rsp.round_id);
    assert_eq!(settle_rsp.bet_results.len(), 1);
}

#[tokio::test]
async fn commands_before_login_are_rejected() {
    let url = spawn_server().await;
    let mut ws = connect(&url).await;

    send_frame(&mut ws, CommandId::RoomJoinReq, RoomJoinReq { room_id: 1 }.encode()).await;
    let frame = recv_frame(&mut ws).await;
    assert_eq!(frame.cmd_id, CommandId::ErrorRsp.as_u32());
    let err = ErrorRsp::decode(&frame.body).unwrap();
    assert_eq!(err.error_code, dicecade_protocol::ErrorCode::AuthRequired.as_u32());
}

#[tokio::test]
async fn corrupt_frame_gets_error_response_and_connection_stays_open() {
    let url = spawn_server().await;
    let mut ws = connect(&url).await;

    // A header declaring a body longer than what's actually sent.
    let mut raw = vec![0u8; 8];
    raw[0..4].copy_from_slice(&CommandId::LoginReq.as_u32().to_le_bytes());
    raw[4..8].copy_from_slice(&100u32.to_le_bytes());
    raw.extend_from_slice(&[1, 2, 3]);
    ws.send(Message::Binary(raw)).await.expect("send corrupt frame");

    let frame = recv_frame(&mut ws).await;
    assert_eq!(frame.cmd_id, CommandId::ErrorRsp.as_u32());
    let err = ErrorRsp::decode(&frame.body).unwrap();
    assert_eq!(err.error_code, dicecade_protocol::ErrorCode::InvalidFormat.as_u32());

    // The connection is still usable: a well-formed login now succeeds.
    let login_rsp = login(&mut ws, "bob", "bobpass").await;
    assert!(login_rsp.success);
}

#[tokio::test]
async fn duplicate_login_from_a_second_connection_is_rejected() {
    let url = spawn_server().await;
    let mut first = connect(&url).await;
    let mut second = connect(&url).await;

    let first_login = login(&mut first, "charlie", "charliepass").await;
    assert!(first_login.success);

    let second_login = login(&mut second, "charlie", "charliepass").await;
    assert!(!second_login.success);
}

#[tokio::test]
async fn unknown_command_id_yields_invalid_format_error() {
    let url = spawn_server().await;
    let mut ws = connect(&url).await;

    login(&mut ws, "alice", "alicepass").await;

    let frame = Frame::new(0xDEAD_BEEF, vec![]);
    ws.send(Message::Binary(frame.encode())).await.expect("send unknown command");
    let frame = recv_frame(&mut ws).await;
    assert_eq!(frame.cmd_id, CommandId::ErrorRsp.as_u32());
    let err = ErrorRsp::decode(&frame.body).unwrap();
    assert_eq!(err.error_code, dicecade_protocol::ErrorCode::InvalidFormat.as_u32());
}
