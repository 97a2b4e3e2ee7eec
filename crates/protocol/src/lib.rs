//! Wire codec and message schema.
//!
//! The frame format (`frame`) and the typed bodies (`messages`) are
//! deliberately separate: `Frame` only knows about bytes and lengths,
//! `messages` only knows about field layouts. The dispatcher in
//! `dicecade-server` is the one place that ties a `CommandId` to the
//! matching message type.

pub mod command;
pub mod frame;
pub mod messages;
pub mod primitives;

pub use command::{CommandId, ErrorCode};
pub use frame::{Frame, FrameError, HEADER_LEN};
pub use primitives::DecodeError;
