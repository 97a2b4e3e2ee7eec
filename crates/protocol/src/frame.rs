use bytes::{Buf, BufMut, BytesMut};
use thiserror::Error;

/// Every frame exchanged over the wire carries this 8-byte header:
/// `cmd_id (u32 LE) ‖ length (u32 LE) ‖ body (length bytes)`, one frame
/// per WebSocket binary message.
pub const HEADER_LEN: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame shorter than the 8-byte header")]
    TooShort,
    #[error("declared length {declared} does not match payload size {actual}")]
    LengthMismatch { declared: u32, actual: u32 },
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub cmd_id: u32,
    pub body: Vec<u8>,
}

impl Frame {
    pub fn new(cmd_id: u32, body: Vec<u8>) -> Self {
        Self { cmd_id, body }
    }

    /// Parses one frame out of a complete WebSocket binary message.
    /// A message is exactly one frame — there is no partial buffering
    /// across messages.
    pub fn decode(raw: &[u8]) -> Result<Self, FrameError> {
        if raw.len() < HEADER_LEN {
            return Err(FrameError::TooShort);
        }
        let mut header = &raw[..HEADER_LEN];
        let cmd_id = header.get_u32_le();
        let length = header.get_u32_le();

        let actual = (raw.len() - HEADER_LEN) as u32;
        if length != actual {
            return Err(FrameError::LengthMismatch { declared: length, actual });
        }

        Ok(Frame { cmd_id, body: raw[HEADER_LEN..].to_vec() })
    }

    /// Serializes this frame into exactly one binary message.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(HEADER_LEN + self.body.len());
        buf.put_u32_le(self.cmd_id);
        buf.put_u32_le(self.body.len() as u32);
        buf.put_slice(&self.body);
        buf.to_vec()
    }
}
