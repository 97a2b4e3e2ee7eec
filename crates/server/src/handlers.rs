use dicecade_protocol::messages::{
    BetFinishedReq, BetFinishedRsp, BetPlacementReq, BetPlacementRsp, BetResult, BetSummary, ErrorRsp,
    LoginReq, LoginRsp, ReckonResultReq, ReckonResultRsp, RoomJoinReq, RoomJoinRsp, SnapshotReq, SnapshotRsp,
};
use dicecade_protocol::{CommandId, DecodeError, ErrorCode, Frame};
use dicecade_state::ConnectionId;

use crate::app_state::AppState;
use crate::dispatcher::ConnState;

pub fn error_frame(code: ErrorCode, message: impl Into<String>) -> Frame {
    let body = ErrorRsp { error_code: code.as_u32(), error_message: message.into(), details: String::new() };
    Frame::new(CommandId::ErrorRsp.as_u32(), body.encode())
}

fn decode_error_frame(_err: DecodeError) -> Frame {
    error_frame(ErrorCode::InvalidFormat, "malformed message body")
}

/// `LOGIN_REQ` is the only command legal before authentication.
pub fn handle_login(state: &AppState, conn: &mut ConnState, body: &[u8]) -> Frame {
    let req = match LoginReq::decode(body) {
        Ok(r) => r,
        Err(e) => return decode_error_frame(e),
    };

    let rsp = match state.store.authenticate(&req.username, &req.password) {
        Some(user) => {
            conn.authenticated = true;
            conn.user_id = user.user_id;
            state.store.bind_connection(conn.conn_id, user.user_id);
            LoginRsp {
                success: true,
                message: "Login successful".to_string(),
                session_token: user.session_token.unwrap_or_default(),
                user_id: user.user_id,
                balance: user.balance,
            }
        }
        None => LoginRsp {
            success: false,
            message: "Invalid credentials or session already active".to_string(),
            session_token: String::new(),
            user_id: 0,
            balance: 0,
        },
    };
    Frame::new(CommandId::LoginRsp.as_u32(), rsp.encode())
}

pub fn handle_room_join(state: &AppState, conn: &ConnState, body: &[u8]) -> Frame {
    let req = match RoomJoinReq::decode(body) {
        Ok(r) => r,
        Err(e) => return decode_error_frame(e),
    };

    let joined = state.store.join_room(conn.user_id, req.room_id);
    let rsp = state.store.transact(|txn| {
        let room = txn.get_room(req.room_id);
        RoomJoinRsp {
            success: joined,
            message: if joined { "Joined room".to_string() } else { "Room is full or does not exist".to_string() },
            room_id: req.room_id,
            player_count: room.map(|r| r.player_count()).unwrap_or(0),
            jackpot_pool: room.map(|r| r.jackpot_pool).unwrap_or(0),
        }
    });
    Frame::new(CommandId::RoomJoinRsp.as_u32(), rsp.encode())
}

pub fn handle_snapshot(state: &AppState, conn: &ConnState, body: &[u8]) -> Frame {
    if let Err(e) = SnapshotReq::decode(body) {
        return decode_error_frame(e);
    }

    let Some(view) = state.engine.snapshot(conn.user_id) else {
        return error_frame(ErrorCode::ServerError, "user not found");
    };

    let rsp = SnapshotRsp {
        user_balance: view.user_balance,
        active_bets: view
            .active_bets
            .into_iter()
            .map(|b| BetSummary { dice_face: b.dice_face, amount: b.amount, bet_id: b.bet_id, round_id: b.round_id })
            .collect(),
        current_room: view.current_room,
        jackpot_pool: view.jackpot_pool,
        round_status: view.round_status as u8,
    };
    Frame::new(CommandId::SnapshotRsp.as_u32(), rsp.encode())
}

pub fn handle_bet_placement(state: &AppState, conn: &ConnState, body: &[u8]) -> Frame {
    let req = match BetPlacementReq::decode(body) {
        Ok(r) => r,
        Err(e) => return decode_error_frame(e),
    };

    let outcome = state.engine.place_bet(conn.user_id, req.dice_face, req.amount, req.round_id());
    let rsp = BetPlacementRsp {
        success: outcome.ok,
        message: outcome.message,
        bet_id: outcome.bet_id,
        round_id: outcome.round_id,
        remaining_balance: outcome.remaining_balance,
    };
    Frame::new(CommandId::BetPlacementRsp.as_u32(), rsp.encode())
}

pub fn handle_bet_finished(state: &AppState, conn: &ConnState, body: &[u8]) -> Frame {
    let req = match BetFinishedReq::decode(body) {
        Ok(r) => r,
        Err(e) => return decode_error_frame(e),
    };

    let outcome = state.engine.finish_betting(conn.user_id, &req.round_id);
    let rsp = BetFinishedRsp { success: outcome.ok, message: outcome.message, round_id: req.round_id };
    Frame::new(CommandId::BetFinishedRsp.as_u32(), rsp.encode())
}

pub fn handle_reckon_result(state: &AppState, conn: &ConnState, body: &[u8]) -> Frame {
    let req = match ReckonResultReq::decode(body) {
        Ok(r) => r,
        Err(e) => return decode_error_frame(e),
    };

    let outcome = state.engine.settle(conn.user_id, &req.round_id);
    if !outcome.ok {
        return error_frame(ErrorCode::InvalidBet, outcome.message);
    }

    let rsp = ReckonResultRsp {
        dice_result: outcome.dice_result,
        bet_results: outcome
            .bet_results
            .into_iter()
            .map(|b| BetResult {
                bet_id: b.bet_id,
                dice_face: b.dice_face,
                bet_amount: b.bet_amount,
                won: b.won,
                payout: b.payout,
                round_id: b.round_id,
            })
            .collect(),
        total_winnings: outcome.total_winnings,
        new_balance: outcome.new_balance,
        updated_jackpot_pool: outcome.jackpot_pool,
        round_id: req.round_id,
    };
    Frame::new(CommandId::ReckonResultRsp.as_u32(), rsp.encode())
}

/// Disconnect cleanup: unbinding a connection always ends its session.
pub fn handle_disconnect(state: &AppState, conn_id: ConnectionId) {
    state.store.unbind_connection(conn_id);
}
