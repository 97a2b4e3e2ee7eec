use std::time::Instant;

use dicecade_domain::{Room, Round, RoundStatus, User};

use crate::store::Inner;

/// A handle to the guarded state for the lifetime of one
/// [`StateStore::transact`](crate::StateStore::transact) call.
///
/// `dicecade-engine` composes its multi-step gameplay operations
/// (validate a bet, debit a balance, append it, possibly roll a fresh
/// round) entirely through this type, so every such operation runs as
/// one atomic unit under the store's single mutex — a debit and its
/// matching bet append are never observable as two separate steps.
pub struct Transaction<'a> {
    inner: &'a mut Inner,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(inner: &'a mut Inner) -> Self {
        Self { inner }
    }

    pub fn get_user(&self, user_id: u32) -> Option<&User> {
        self.inner.users.get(&user_id)
    }

    pub fn get_user_mut(&mut self, user_id: u32) -> Option<&mut User> {
        self.inner.users.get_mut(&user_id)
    }

    pub fn get_room(&self, room_id: u32) -> Option<&Room> {
        self.inner.rooms.get(&room_id)
    }

    pub fn get_room_mut(&mut self, room_id: u32) -> Option<&mut Room> {
        self.inner.rooms.get_mut(&room_id)
    }

    pub fn get_round(&self, round_id: &str) -> Option<&Round> {
        self.inner.active_rounds.get(round_id)
    }

    pub fn get_round_mut(&mut self, round_id: &str) -> Option<&mut Round> {
        self.inner.active_rounds.get_mut(round_id)
    }

    /// The user's currently-betting round, if one exists. At most one
    /// such round can exist per user at a time.
    pub fn find_betting_round_for_user(&self, user_id: u32) -> Option<&Round> {
        self.inner
            .active_rounds
            .values()
            .find(|r| r.user_id == user_id && r.status == RoundStatus::Betting)
    }

    /// Any active round belonging to the user, regardless of status —
    /// used by `snapshot`, which reports whatever round (betting or
    /// awaiting results) is currently open.
    pub fn find_any_round_for_user(&self, user_id: u32) -> Option<&Round> {
        self.inner.active_rounds.values().find(|r| r.user_id == user_id)
    }

    pub fn insert_round(&mut self, round: Round) {
        self.inner.active_rounds.insert(round.round_id.clone(), round);
    }

    pub fn remove_round(&mut self, round_id: &str) -> Option<Round> {
        self.inner.active_rounds.remove(round_id)
    }

    /// Ids of every active round whose `created_at` is older than
    /// `max_age` as of `now`. Lets `dicecade-engine` implement the
    /// stale-round sweep without reaching into `Inner` directly.
    pub fn round_ids_older_than(&self, max_age: std::time::Duration, now: Instant) -> Vec<String> {
        self.inner
            .active_rounds
            .values()
            .filter(|r| now.duration_since(r.created_at) > max_age)
            .map(|r| r.round_id.clone())
            .collect()
    }
}
