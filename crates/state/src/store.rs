use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use dicecade_domain::{Room, Round, User};
use dicecade_session::{generate_session_token, verify_password, RateLimiterTable};
use tracing::{info, warn};

use crate::bootstrap::{seed_rooms, seed_users};
use crate::connection::ConnectionId;
use crate::transaction::Transaction;

/// Tunables the store needs that aren't domain invariants.
#[derive(Debug, Clone, Copy)]
pub struct StoreConfig {
    pub session_timeout: Duration,
    pub rate_limit_per_minute: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { session_timeout: Duration::from_secs(1800), rate_limit_per_minute: 100 }
    }
}

/// Everything the single store-wide mutex guards: users, rooms, active
/// rounds, the connection↔user map, and the rate-limit table all live
/// in one place so there is exactly one lock to reason about.
pub(crate) struct Inner {
    pub users: HashMap<u32, User>,
    pub rooms: HashMap<u32, Room>,
    pub active_rounds: HashMap<String, Round>,
    pub connections: HashMap<ConnectionId, u32>,
    pub user_connections: HashMap<u32, ConnectionId>,
    pub next_user_id: u32,
    pub rate_limiter: RateLimiterTable,
}

pub struct StateStore {
    inner: Mutex<Inner>,
    config: StoreConfig,
}

impl StateStore {
    pub fn new(config: StoreConfig) -> Self {
        let (users, next_user_id) = seed_users();
        let rooms = seed_rooms();
        Self {
            inner: Mutex::new(Inner {
                users,
                rooms,
                active_rounds: HashMap::new(),
                connections: HashMap::new(),
                user_connections: HashMap::new(),
                next_user_id,
                rate_limiter: RateLimiterTable::new(),
            }),
            config,
        }
    }

    /// Runs `f` with exclusive access to the whole guarded state. This
    /// is the only way any code outside this module touches the
    /// internals — `dicecade-engine`'s multi-step gameplay logic
    /// (validate, debit, append, all as one logical action) composes
    /// entirely inside a single call here, so it never races against
    /// another connection's handler.
    pub fn transact<R>(&self, f: impl FnOnce(&mut Transaction) -> R) -> R {
        let mut guard = self.inner.lock().expect("state store mutex poisoned");
        let mut txn = Transaction::new(&mut guard);
        f(&mut txn)
    }

    /// Authenticates a username/password pair. Rejects re-login while a
    /// previous session is still live (the duplicate-session rule).
    pub fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        let mut guard = self.inner.lock().expect("state store mutex poisoned");
        let timeout = self.config.session_timeout;

        let user_id = guard
            .users
            .values()
            .find(|u| u.username == username)
            .map(|u| u.user_id)?;

        let password_ok = verify_password(password, &guard.users[&user_id].password_hash);
        if !password_ok {
            return None;
        }

        let user = guard.users.get_mut(&user_id).unwrap();
        if user.has_live_session(timeout) {
            warn!(user_id, "rejected login: session already live");
            return None;
        }

        user.session_token = Some(generate_session_token());
        user.touch();
        info!(user_id, username, "login succeeded");
        Some(user.clone())
    }

    /// Looks up a user by session token, touching `last_activity` on a
    /// hit. An expired-but-still-present token is treated as absent.
    pub fn resolve_session(&self, token: &str) -> Option<User> {
        let mut guard = self.inner.lock().expect("state store mutex poisoned");
        let timeout = self.config.session_timeout;

        let user_id = guard.users.values().find_map(|u| {
            if u.session_token.as_deref() == Some(token) && u.has_live_session(timeout) {
                Some(u.user_id)
            } else {
                None
            }
        })?;

        let user = guard.users.get_mut(&user_id).unwrap();
        user.touch();
        Some(user.clone())
    }

    pub fn join_room(&self, user_id: u32, room_id: u32) -> bool {
        let mut guard = self.inner.lock().expect("state store mutex poisoned");

        if !guard.users.contains_key(&user_id) || !guard.rooms.contains_key(&room_id) {
            return false;
        }

        let previous_room = guard.users[&user_id].current_room;
        if let Some(previous) = previous_room {
            if let Some(room) = guard.rooms.get_mut(&previous) {
                room.remove_player(user_id);
            }
        }

        let joined = guard.rooms.get_mut(&room_id).map(|r| r.add_player(user_id)).unwrap_or(false);
        if joined {
            guard.users.get_mut(&user_id).unwrap().current_room = Some(room_id);
        }
        joined
    }

    /// Idempotent: leaving a room the user isn't in is a no-op.
    pub fn leave_room(&self, user_id: u32) {
        let mut guard = self.inner.lock().expect("state store mutex poisoned");
        let Some(user) = guard.users.get_mut(&user_id) else { return };
        let Some(room_id) = user.current_room.take() else { return };
        if let Some(room) = guard.rooms.get_mut(&room_id) {
            room.remove_player(user_id);
        }
    }

    pub fn bind_connection(&self, conn: ConnectionId, user_id: u32) {
        let mut guard = self.inner.lock().expect("state store mutex poisoned");
        guard.connections.insert(conn, user_id);
        guard.user_connections.insert(user_id, conn);
    }

    /// Unbinds a connection, invalidating the session and leaving the
    /// room — a disconnect always ends the session.
    pub fn unbind_connection(&self, conn: ConnectionId) {
        let user_id = {
            let mut guard = self.inner.lock().expect("state store mutex poisoned");
            let Some(user_id) = guard.connections.remove(&conn) else { return };
            guard.user_connections.remove(&user_id);
            user_id
        };

        self.leave_room(user_id);

        let mut guard = self.inner.lock().expect("state store mutex poisoned");
        if let Some(user) = guard.users.get_mut(&user_id) {
            user.session_token = None;
        }
    }

    /// Clears tokens of every user whose session has timed out, and
    /// evicts them from their room. Run periodically by the sweeper.
    pub fn sweep_expired_sessions(&self) {
        let mut guard = self.inner.lock().expect("state store mutex poisoned");
        let timeout = self.config.session_timeout;

        let expired: Vec<u32> = guard
            .users
            .values()
            .filter(|u| u.session_token.is_some() && !u.has_live_session(timeout))
            .map(|u| u.user_id)
            .collect();

        for user_id in expired {
            let room_id = {
                let user = guard.users.get_mut(&user_id).unwrap();
                user.session_token = None;
                user.current_room.take()
            };
            if let Some(room_id) = room_id {
                if let Some(room) = guard.rooms.get_mut(&room_id) {
                    room.remove_player(user_id);
                }
            }
            info!(user_id, "session expired, swept");
        }
    }

    pub fn rate_limit_check(&self, user_id: u32) -> bool {
        let mut guard = self.inner.lock().expect("state store mutex poisoned");
        let cap = self.config.rate_limit_per_minute;
        guard.rate_limiter.record(user_id, cap, Instant::now())
    }

    pub fn rate_limit_evict_idle(&self) {
        let mut guard = self.inner.lock().expect("state store mutex poisoned");
        guard.rate_limiter.evict_idle(Instant::now());
    }
}
