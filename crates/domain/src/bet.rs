use std::time::Instant;

/// Tri-state outcome of a bet: unknown until the round settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetOutcome {
    Unknown,
    Won,
    Lost,
}

#[derive(Debug, Clone)]
pub struct Bet {
    pub bet_id: String,
    pub user_id: u32,
    pub round_id: String,
    pub dice_face: u32,
    pub amount: i64,
    pub outcome: BetOutcome,
    pub payout: i64,
    pub created_at: Instant,
}

impl Bet {
    pub fn new(user_id: u32, round_id: impl Into<String>, dice_face: u32, amount: i64) -> Self {
        Self {
            bet_id: uuid::Uuid::new_v4().to_string(),
            user_id,
            round_id: round_id.into(),
            dice_face,
            amount,
            outcome: BetOutcome::Unknown,
            payout: 0,
            created_at: Instant::now(),
        }
    }

    /// Settles this bet against a rolled `dice_result`.
    pub fn settle(&mut self, dice_result: u32) {
        if self.dice_face == dice_result {
            self.outcome = BetOutcome::Won;
            self.payout = self.amount * crate::constants::PAYOUT_MULTIPLIER;
        } else {
            self.outcome = BetOutcome::Lost;
            self.payout = 0;
        }
    }

    pub fn won(&self) -> bool {
        matches!(self.outcome, BetOutcome::Won)
    }
}
