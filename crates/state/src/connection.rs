/// Opaque handle identifying one live WebSocket connection. The server
/// crate mints these from a monotonic counter as sockets are accepted;
/// the state store only ever treats them as an opaque map key, mapping
/// bidirectionally to a `user_id` once that connection authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);
