/// Command ids for the wire protocol's request/response catalog.
/// Client-to-server ids are even-hundreds (`0x000N`); the matching
/// server-to-client response is `0x100N`. `ERROR_RSP` may stand in for
/// any response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum CommandId {
    LoginReq = 0x0001,
    LoginRsp = 0x1001,
    RoomJoinReq = 0x0002,
    RoomJoinRsp = 0x1002,
    SnapshotReq = 0x0003,
    SnapshotRsp = 0x1003,
    BetPlacementReq = 0x0004,
    BetPlacementRsp = 0x1004,
    BetFinishedReq = 0x0005,
    BetFinishedRsp = 0x1005,
    ReckonResultReq = 0x0006,
    ReckonResultRsp = 0x1006,
    ErrorRsp = 0x9999,
}

impl CommandId {
    pub fn from_u32(value: u32) -> Option<Self> {
        Some(match value {
            0x0001 => Self::LoginReq,
            0x1001 => Self::LoginRsp,
            0x0002 => Self::RoomJoinReq,
            0x1002 => Self::RoomJoinRsp,
            0x0003 => Self::SnapshotReq,
            0x1003 => Self::SnapshotRsp,
            0x0004 => Self::BetPlacementReq,
            0x1004 => Self::BetPlacementRsp,
            0x0005 => Self::BetFinishedReq,
            0x1005 => Self::BetFinishedRsp,
            0x0006 => Self::ReckonResultReq,
            0x1006 => Self::ReckonResultRsp,
            0x9999 => Self::ErrorRsp,
            _ => return None,
        })
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Error codes carried in `ERROR_RSP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    InvalidFormat = 1000,
    AuthRequired = 1001,
    InsufficientBalance = 1002,
    InvalidRoom = 1003,
    InvalidBet = 1004,
    ServerError = 1005,
    RateLimit = 1006,
}

impl ErrorCode {
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}
