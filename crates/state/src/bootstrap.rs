use dicecade_domain::constants::{DEFAULT_BALANCE, DEFAULT_ROOM_COUNT, MAX_ROOM_CAPACITY};
use dicecade_domain::{Room, User};
use std::collections::HashMap;

/// Seed users, created fresh every time the process starts.
const SEED_USERS: &[(&str, &str)] = &[
    ("testuser1", "password123"),
    ("testuser2", "password123"),
    ("alice", "alicepass"),
    ("bob", "bobpass"),
    ("charlie", "charliepass"),
];

/// Builds the default user table, assigning ids 1..=N in fixture order.
/// Returns the table and the next free user id.
pub fn seed_users() -> (HashMap<u32, User>, u32) {
    let mut users = HashMap::new();
    let mut next_id = 1;
    for (username, password) in SEED_USERS {
        let hash = dicecade_session::hash_password(password)
            .expect("bcrypt hashing a short fixture password cannot fail");
        users.insert(next_id, User::new(next_id, *username, hash, DEFAULT_BALANCE));
        next_id += 1;
    }
    (users, next_id)
}

/// Builds the default room pool: `DEFAULT_ROOM_COUNT` rooms numbered
/// 1..=N, each capped at `MAX_ROOM_CAPACITY`.
pub fn seed_rooms() -> HashMap<u32, Room> {
    (1..=DEFAULT_ROOM_COUNT)
        .map(|id| (id, Room::new(id, format!("Room {id}"), MAX_ROOM_CAPACITY)))
        .collect()
}
