use std::collections::HashSet;
use std::time::Instant;

/// A betting room. Rooms are a fixed pool created at startup; there is
/// no way to create or destroy a room at runtime.
#[derive(Debug, Clone)]
pub struct Room {
    pub room_id: u32,
    pub name: String,
    pub max_capacity: u32,
    pub current_players: HashSet<u32>,
    pub jackpot_pool: i64,
    pub created_at: Instant,
    pub last_activity: Instant,
}

impl Room {
    pub fn new(room_id: u32, name: impl Into<String>, max_capacity: u32) -> Self {
        let now = Instant::now();
        Self {
            room_id,
            name: name.into(),
            max_capacity,
            current_players: HashSet::new(),
            jackpot_pool: 0,
            created_at: now,
            last_activity: now,
        }
    }

    pub fn is_full(&self) -> bool {
        self.current_players.len() as u32 >= self.max_capacity
    }

    /// Returns `false` without mutating anything if the room is full.
    pub fn add_player(&mut self, user_id: u32) -> bool {
        if self.is_full() {
            return false;
        }
        self.current_players.insert(user_id);
        self.last_activity = Instant::now();
        true
    }

    pub fn remove_player(&mut self, user_id: u32) {
        self.current_players.remove(&user_id);
        self.last_activity = Instant::now();
    }

    pub fn player_count(&self) -> u32 {
        self.current_players.len() as u32
    }
}
