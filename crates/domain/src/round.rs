use std::time::Instant;

use crate::bet::Bet;
use crate::constants::MAX_BETS_PER_ROUND;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Betting,
    AwaitingResults,
}

/// A round is the envelope for one user's bets against a single,
/// eventually-rolled die. A round belongs to exactly one user and one
/// room; it is owned by the state store's active-round index for its
/// entire lifetime (see `dicecade_state::store`).
#[derive(Debug, Clone)]
pub struct Round {
    pub round_id: String,
    pub user_id: u32,
    pub room_id: u32,
    pub bets: Vec<Bet>,
    pub status: RoundStatus,
    pub dice_result: Option<u32>,
    pub total_winnings: i64,
    pub created_at: Instant,
    pub finished_at: Option<Instant>,
}

impl Round {
    pub fn new(user_id: u32, room_id: u32) -> Self {
        Self {
            round_id: uuid::Uuid::new_v4().to_string(),
            user_id,
            room_id,
            bets: Vec::new(),
            status: RoundStatus::Betting,
            dice_result: None,
            total_winnings: 0,
            created_at: Instant::now(),
            finished_at: None,
        }
    }

    pub fn is_full(&self) -> bool {
        self.bets.len() >= MAX_BETS_PER_ROUND
    }

    /// Appends a bet. Callers must have already checked `status` and
    /// `is_full` — this type does not re-validate round invariants,
    /// it only stores what it's told (validation lives in the engine).
    pub fn push_bet(&mut self, bet: Bet) {
        self.bets.push(bet);
    }

    pub fn finish_betting(&mut self) {
        self.status = RoundStatus::AwaitingResults;
    }

    /// Rolls against every bet in the round and returns total winnings.
    pub fn settle(&mut self, dice_result: u32) -> i64 {
        self.dice_result = Some(dice_result);
        let mut total_winnings = 0;
        for bet in &mut self.bets {
            bet.settle(dice_result);
            total_winnings += bet.payout;
        }
        self.total_winnings = total_winnings;
        self.finished_at = Some(Instant::now());
        total_winnings
    }

    pub fn total_bet_amount(&self) -> i64 {
        self.bets.iter().map(|b| b.amount).sum()
    }
}
