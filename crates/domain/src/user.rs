use std::time::Instant;

/// A registered player.
///
/// `user_id` is assigned monotonically by the state store at creation
/// and never reused. `password_hash` is an adaptive, salted hash —
/// callers authenticate through `dicecade_session`, never by comparing
/// this field directly.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: u32,
    pub username: String,
    pub password_hash: String,
    pub balance: i64,
    pub session_token: Option<String>,
    pub last_activity: Instant,
    pub current_room: Option<u32>,
    pub created_at: Instant,
}

impl User {
    pub fn new(user_id: u32, username: impl Into<String>, password_hash: impl Into<String>, balance: i64) -> Self {
        let now = Instant::now();
        Self {
            user_id,
            username: username.into(),
            password_hash: password_hash.into(),
            balance,
            session_token: None,
            last_activity: now,
            current_room: None,
            created_at: now,
        }
    }

    /// A session is live only if a token is set and the inactivity
    /// timeout hasn't elapsed since `last_activity`.
    pub fn has_live_session(&self, session_timeout: std::time::Duration) -> bool {
        match &self.session_token {
            Some(_) => self.last_activity.elapsed() <= session_timeout,
            None => false,
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}
