//! Typed request/response bodies for every command in the wire
//! protocol's catalog. Each type's `encode`/`decode` pair defines the
//! wire format; field order here *is* the wire order.

use crate::primitives::{BodyReader, BodyWriter, DecodeError};

#[derive(Debug, Clone, PartialEq)]
pub struct LoginReq {
    pub username: String,
    pub password: String,
}

impl LoginReq {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.put_str(&self.username).put_str(&self.password);
        w.into_vec()
    }

    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BodyReader::new(body);
        Ok(Self { username: r.get_str()?, password: r.get_str()? })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginRsp {
    pub success: bool,
    pub message: String,
    pub session_token: String,
    pub user_id: u32,
    pub balance: i64,
}

impl LoginRsp {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.put_bool(self.success)
            .put_str(&self.message)
            .put_str(&self.session_token)
            .put_u32(self.user_id)
            .put_i64(self.balance);
        w.into_vec()
    }

    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BodyReader::new(body);
        Ok(Self {
            success: r.get_bool()?,
            message: r.get_str()?,
            session_token: r.get_str()?,
            user_id: r.get_u32()?,
            balance: r.get_i64()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomJoinReq {
    pub room_id: u32,
}

impl RoomJoinReq {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.put_u32(self.room_id);
        w.into_vec()
    }

    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BodyReader::new(body);
        Ok(Self { room_id: r.get_u32()? })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomJoinRsp {
    pub success: bool,
    pub message: String,
    pub room_id: u32,
    pub player_count: u32,
    pub jackpot_pool: i64,
}

impl RoomJoinRsp {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.put_bool(self.success)
            .put_str(&self.message)
            .put_u32(self.room_id)
            .put_u32(self.player_count)
            .put_i64(self.jackpot_pool);
        w.into_vec()
    }

    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BodyReader::new(body);
        Ok(Self {
            success: r.get_bool()?,
            message: r.get_str()?,
            room_id: r.get_u32()?,
            player_count: r.get_u32()?,
            jackpot_pool: r.get_i64()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotReq;

impl SnapshotReq {
    pub fn encode(&self) -> Vec<u8> {
        Vec::new()
    }

    pub fn decode(_body: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BetSummary {
    pub dice_face: u32,
    pub amount: i64,
    pub bet_id: String,
    pub round_id: String,
}

impl BetSummary {
    fn write(&self, w: &mut BodyWriter) {
        w.put_u32(self.dice_face).put_i64(self.amount).put_str(&self.bet_id).put_str(&self.round_id);
    }

    fn read(r: &mut BodyReader) -> Result<Self, DecodeError> {
        Ok(Self {
            dice_face: r.get_u32()?,
            amount: r.get_i64()?,
            bet_id: r.get_str()?,
            round_id: r.get_str()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRsp {
    pub user_balance: i64,
    pub active_bets: Vec<BetSummary>,
    pub current_room: u32,
    pub jackpot_pool: i64,
    pub round_status: u8,
}

impl SnapshotRsp {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.put_i64(self.user_balance);
        w.put_u32(self.active_bets.len() as u32);
        for bet in &self.active_bets {
            bet.write(&mut w);
        }
        w.put_u32(self.current_room).put_i64(self.jackpot_pool).put_u8(self.round_status);
        w.into_vec()
    }

    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BodyReader::new(body);
        let user_balance = r.get_i64()?;
        let count = r.get_u32()?;
        let mut active_bets = Vec::with_capacity(count as usize);
        for _ in 0..count {
            active_bets.push(BetSummary::read(&mut r)?);
        }
        Ok(Self {
            user_balance,
            active_bets,
            current_room: r.get_u32()?,
            jackpot_pool: r.get_i64()?,
            round_status: r.get_u8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BetPlacementReq {
    pub dice_face: u32,
    pub amount: i64,
    /// Empty string means "no round id supplied" — let the server pick
    /// or create the active round.
    pub round_id: String,
}

impl BetPlacementReq {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.put_u32(self.dice_face).put_i64(self.amount).put_str(&self.round_id);
        w.into_vec()
    }

    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BodyReader::new(body);
        Ok(Self { dice_face: r.get_u32()?, amount: r.get_i64()?, round_id: r.get_str()? })
    }

    pub fn round_id(&self) -> Option<&str> {
        if self.round_id.is_empty() {
            None
        } else {
            Some(&self.round_id)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BetPlacementRsp {
    pub success: bool,
    pub message: String,
    pub bet_id: String,
    pub round_id: String,
    pub remaining_balance: i64,
}

impl BetPlacementRsp {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.put_bool(self.success)
            .put_str(&self.message)
            .put_str(&self.bet_id)
            .put_str(&self.round_id)
            .put_i64(self.remaining_balance);
        w.into_vec()
    }

    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BodyReader::new(body);
        Ok(Self {
            success: r.get_bool()?,
            message: r.get_str()?,
            bet_id: r.get_str()?,
            round_id: r.get_str()?,
            remaining_balance: r.get_i64()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BetFinishedReq {
    pub round_id: String,
}

impl BetFinishedReq {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.put_str(&self.round_id);
        w.into_vec()
    }

    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BodyReader::new(body);
        Ok(Self { round_id: r.get_str()? })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BetFinishedRsp {
    pub success: bool,
    pub message: String,
    pub round_id: String,
}

impl BetFinishedRsp {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.put_bool(self.success).put_str(&self.message).put_str(&self.round_id);
        w.into_vec()
    }

    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BodyReader::new(body);
        Ok(Self { success: r.get_bool()?, message: r.get_str()?, round_id: r.get_str()? })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReckonResultReq {
    pub round_id: String,
}

impl ReckonResultReq {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.put_str(&self.round_id);
        w.into_vec()
    }

    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BodyReader::new(body);
        Ok(Self { round_id: r.get_str()? })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BetResult {
    pub bet_id: String,
    pub dice_face: u32,
    pub bet_amount: i64,
    pub won: bool,
    pub payout: i64,
    pub round_id: String,
}

impl BetResult {
    fn write(&self, w: &mut BodyWriter) {
        w.put_str(&self.bet_id)
            .put_u32(self.dice_face)
            .put_i64(self.bet_amount)
            .put_bool(self.won)
            .put_i64(self.payout)
            .put_str(&self.round_id);
    }

    fn read(r: &mut BodyReader) -> Result<Self, DecodeError> {
        Ok(Self {
            bet_id: r.get_str()?,
            dice_face: r.get_u32()?,
            bet_amount: r.get_i64()?,
            won: r.get_bool()?,
            payout: r.get_i64()?,
            round_id: r.get_str()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReckonResultRsp {
    pub dice_result: u32,
    pub bet_results: Vec<BetResult>,
    pub total_winnings: i64,
    pub new_balance: i64,
    pub updated_jackpot_pool: i64,
    pub round_id: String,
}

impl ReckonResultRsp {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.put_u32(self.dice_result);
        w.put_u32(self.bet_results.len() as u32);
        for result in &self.bet_results {
            result.write(&mut w);
        }
        w.put_i64(self.total_winnings)
            .put_i64(self.new_balance)
            .put_i64(self.updated_jackpot_pool)
            .put_str(&self.round_id);
        w.into_vec()
    }

    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BodyReader::new(body);
        let dice_result = r.get_u32()?;
        let count = r.get_u32()?;
        let mut bet_results = Vec::with_capacity(count as usize);
        for _ in 0..count {
            bet_results.push(BetResult::read(&mut r)?);
        }
        Ok(Self {
            dice_result,
            bet_results,
            total_winnings: r.get_i64()?,
            new_balance: r.get_i64()?,
            updated_jackpot_pool: r.get_i64()?,
            round_id: r.get_str()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRsp {
    pub error_code: u32,
    pub error_message: String,
    pub details: String,
}

impl ErrorRsp {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = BodyWriter::new();
        w.put_u32(self.error_code).put_str(&self.error_message).put_str(&self.details);
        w.into_vec()
    }

    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BodyReader::new(body);
        Ok(Self {
            error_code: r.get_u32()?,
            error_message: r.get_str()?,
            details: r.get_str()?,
        })
    }
}
