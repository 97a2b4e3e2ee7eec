/// One bet as reported in a snapshot — not yet settled.
#[derive(Debug, Clone, PartialEq)]
pub struct BetView {
    pub dice_face: u32,
    pub amount: i64,
    pub bet_id: String,
    pub round_id: String,
}

/// One bet's outcome as reported after settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct BetResultView {
    pub bet_id: String,
    pub dice_face: u32,
    pub bet_amount: i64,
    pub won: bool,
    pub payout: i64,
    pub round_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceBetOutcome {
    pub ok: bool,
    pub message: String,
    pub bet_id: String,
    pub round_id: String,
    pub remaining_balance: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinishBettingOutcome {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettleOutcome {
    pub ok: bool,
    pub message: String,
    pub dice_result: u32,
    pub bet_results: Vec<BetResultView>,
    pub total_winnings: i64,
    pub new_balance: i64,
    pub jackpot_pool: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotView {
    pub user_balance: i64,
    pub active_bets: Vec<BetView>,
    pub current_room: u32,
    pub jackpot_pool: i64,
    pub round_status: dicecade_domain::RoundStatusView,
}
