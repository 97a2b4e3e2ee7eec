use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of message body")]
    UnexpectedEof,
    #[error("string field is not valid UTF-8")]
    InvalidUtf8,
}

/// Appends wire-format primitives to a growing message body. Strings
/// are length-prefixed UTF-8 (`u32 LE` byte count, then the bytes) —
/// there is no null termination or fixed width anywhere in the body.
#[derive(Debug, Default)]
pub struct BodyWriter {
    buf: BytesMut,
}

impl BodyWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_bool(&mut self, value: bool) -> &mut Self {
        self.buf.put_u8(value as u8);
        self
    }

    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.buf.put_u32_le(value);
        self
    }

    pub fn put_u8(&mut self, value: u8) -> &mut Self {
        self.buf.put_u8(value);
        self
    }

    pub fn put_i64(&mut self, value: i64) -> &mut Self {
        self.buf.put_i64_le(value);
        self
    }

    pub fn put_str(&mut self, value: &str) -> &mut Self {
        self.buf.put_u32_le(value.len() as u32);
        self.buf.put_slice(value.as_bytes());
        self
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}

/// Reads wire-format primitives back out of a message body, tracking a
/// read cursor over the underlying bytes.
pub struct BodyReader {
    buf: Bytes,
}

impl BodyReader {
    pub fn new(body: &[u8]) -> Self {
        Self { buf: Bytes::copy_from_slice(body) }
    }

    fn require(&self, n: usize) -> Result<(), DecodeError> {
        if self.buf.remaining() < n {
            Err(DecodeError::UnexpectedEof)
        } else {
            Ok(())
        }
    }

    pub fn get_bool(&mut self) -> Result<bool, DecodeError> {
        self.require(1)?;
        Ok(self.buf.get_u8() != 0)
    }

    pub fn get_u32(&mut self) -> Result<u32, DecodeError> {
        self.require(4)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn get_u8(&mut self) -> Result<u8, DecodeError> {
        self.require(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn get_i64(&mut self) -> Result<i64, DecodeError> {
        self.require(8)?;
        Ok(self.buf.get_i64_le())
    }

    pub fn get_str(&mut self) -> Result<String, DecodeError> {
        let len = self.get_u32()? as usize;
        self.require(len)?;
        let bytes = self.buf.copy_to_bytes(len);
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8)
    }

    pub fn is_empty(&self) -> bool {
        !self.buf.has_remaining()
    }
}
