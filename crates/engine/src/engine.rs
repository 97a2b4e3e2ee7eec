use std::sync::Arc;
use std::time::{Duration, Instant};

use dicecade_domain::constants::{MAX_BET, MAX_BETS_PER_ROUND, MAX_DICE_FACE, MIN_BET, MIN_DICE_FACE};
use dicecade_domain::{Bet, Round, RoundStatus, RoundStatusView};
use dicecade_state::{StateStore, Transaction};
use tracing::{info, warn};

use crate::dice::DiceRoller;
use crate::views::{BetResultView, BetView, FinishBettingOutcome, PlaceBetOutcome, SettleOutcome, SnapshotView};

/// Bet validation, round lifecycle, settlement, and the stale-round
/// sweep. Every operation runs through exactly one
/// [`StateStore::transact`] call, so a validation pass and the
/// mutation that follows it are never split across two lock
/// acquisitions.
pub struct GameEngine {
    store: Arc<StateStore>,
    dice: Box<dyn DiceRoller>,
}

impl GameEngine {
    pub fn new(store: Arc<StateStore>, dice: Box<dyn DiceRoller>) -> Self {
        Self { store, dice }
    }

    pub fn place_bet(&self, user_id: u32, dice_face: u32, amount: i64, round_id: Option<&str>) -> PlaceBetOutcome {
        self.store.transact(|txn| {
            let fail = |message: &str, balance: i64| PlaceBetOutcome {
                ok: false,
                message: message.to_string(),
                bet_id: String::new(),
                round_id: String::new(),
                remaining_balance: balance,
            };

            let Some(user) = txn.get_user(user_id) else {
                return fail("User not found", 0);
            };
            let balance = user.balance;

            if !(MIN_DICE_FACE..=MAX_DICE_FACE).contains(&dice_face) {
                return fail("Invalid dice face (must be 1-6)", balance);
            }
            if !(MIN_BET..=MAX_BET).contains(&amount) {
                return fail("Invalid bet amount (1-1000)", balance);
            }
            if balance < amount {
                return fail("Insufficient balance", balance);
            }

            let resolved_round_id = match round_id {
                Some(rid) => match txn.get_round(rid) {
                    Some(r) if r.user_id == user_id => rid.to_string(),
                    _ => return fail("Invalid round", balance),
                },
                None => match get_or_create_active_round(txn, user_id) {
                    Some(rid) => rid,
                    None => return fail("Failed to create game round", balance),
                },
            };

            let round = txn.get_round(&resolved_round_id).unwrap();
            if round.status != RoundStatus::Betting {
                return fail("Betting phase has ended", balance);
            }
            if round.is_full() {
                return fail("Maximum bets per round exceeded", balance);
            }

            let bet = Bet::new(user_id, resolved_round_id.clone(), dice_face, amount);
            let bet_id = bet.bet_id.clone();
            txn.get_user_mut(user_id).unwrap().balance -= amount;
            txn.get_round_mut(&resolved_round_id).unwrap().push_bet(bet);
            let remaining_balance = txn.get_user(user_id).unwrap().balance;

            info!(user_id, bet_id, amount, dice_face, "bet placed");

            PlaceBetOutcome {
                ok: true,
                message: "Bet placed successfully".to_string(),
                bet_id,
                round_id: resolved_round_id,
                remaining_balance,
            }
        })
    }

    pub fn finish_betting(&self, user_id: u32, round_id: &str) -> FinishBettingOutcome {
        self.store.transact(|txn| {
            let Some(round) = txn.get_round(round_id) else {
                return FinishBettingOutcome { ok: true, message: "Round already processed".to_string() };
            };

            if round.user_id != user_id {
                return FinishBettingOutcome {
                    ok: false,
                    message: "Round does not belong to user".to_string(),
                };
            }

            match round.status {
                RoundStatus::AwaitingResults => {
                    FinishBettingOutcome { ok: true, message: "Round already finished".to_string() }
                }
                RoundStatus::Betting => {
                    if round.bets.is_empty() {
                        return FinishBettingOutcome {
                            ok: false,
                            message: "No bets placed in current round".to_string(),
                        };
                    }
                    txn.get_round_mut(round_id).unwrap().finish_betting();
                    FinishBettingOutcome { ok: true, message: "Betting phase completed".to_string() }
                }
            }
        })
    }

    pub fn settle(&self, user_id: u32, round_id: &str) -> SettleOutcome {
        self.store.transact(|txn| {
            let Some(round) = txn.get_round(round_id) else {
                return SettleOutcome {
                    ok: true,
                    message: "Results already calculated".to_string(),
                    dice_result: 3,
                    bet_results: Vec::new(),
                    total_winnings: 0,
                    new_balance: 0,
                    jackpot_pool: 0,
                };
            };

            if round.user_id != user_id {
                return SettleOutcome {
                    ok: false,
                    message: "Round does not belong to user".to_string(),
                    dice_result: 0,
                    bet_results: Vec::new(),
                    total_winnings: 0,
                    new_balance: 0,
                    jackpot_pool: 0,
                };
            }

            if round.status == RoundStatus::Betting {
                txn.get_round_mut(round_id).unwrap().finish_betting();
            }

            let dice_result = self.dice.roll();
            let total_bet_amount = txn.get_round(round_id).unwrap().total_bet_amount();
            let total_winnings = txn.get_round_mut(round_id).unwrap().settle(dice_result);

            let new_balance = {
                let user = txn.get_user_mut(user_id).unwrap();
                user.balance += total_winnings;
                user.balance
            };

            // Jackpot accrues to the user's *current* room, not the room the
            // round was opened in — the two can differ if the user switched
            // rooms while this round was still unsettled.
            let current_room = txn.get_user(user_id).and_then(|u| u.current_room);
            let jackpot_contribution = total_bet_amount / 100;
            let jackpot_pool = match current_room.and_then(|room_id| txn.get_room_mut(room_id)) {
                Some(room) => {
                    room.jackpot_pool += jackpot_contribution;
                    room.jackpot_pool
                }
                None => 0,
            };

            let round = txn.remove_round(round_id).unwrap();
            let bet_results = round
                .bets
                .iter()
                .map(|b| BetResultView {
                    bet_id: b.bet_id.clone(),
                    dice_face: b.dice_face,
                    bet_amount: b.amount,
                    won: b.won(),
                    payout: b.payout,
                    round_id: b.round_id.clone(),
                })
                .collect();

            info!(user_id, round_id, dice_result, total_winnings, "round settled");

            SettleOutcome {
                ok: true,
                message: "Results calculated successfully".to_string(),
                dice_result,
                bet_results,
                total_winnings,
                new_balance,
                jackpot_pool,
            }
        })
    }

    pub fn snapshot(&self, user_id: u32) -> Option<SnapshotView> {
        self.store.transact(|txn| {
            let user = txn.get_user(user_id)?;
            let balance = user.balance;
            let current_room = user.current_room;

            let (round_status, active_bets) = match txn.find_any_round_for_user(user_id) {
                Some(round) => (
                    RoundStatusView::from(round.status),
                    round
                        .bets
                        .iter()
                        .map(|b| BetView {
                            dice_face: b.dice_face,
                            amount: b.amount,
                            bet_id: b.bet_id.clone(),
                            round_id: b.round_id.clone(),
                        })
                        .collect(),
                ),
                None => (RoundStatusView::NoActiveRound, Vec::new()),
            };

            let jackpot_pool = current_room.and_then(|id| txn.get_room(id)).map(|r| r.jackpot_pool).unwrap_or(0);

            Some(SnapshotView {
                user_balance: balance,
                active_bets,
                current_room: current_room.unwrap_or(0),
                jackpot_pool,
                round_status,
            })
        })
    }

    /// Removes any round older than `max_age`, lossily: pending debits
    /// from its bets are not refunded.
    pub fn sweep_stale_rounds(&self, max_age: Duration) {
        self.store.transact(|txn| {
            let stale = txn.round_ids_older_than(max_age, Instant::now());
            for round_id in &stale {
                txn.remove_round(round_id);
            }
            if !stale.is_empty() {
                warn!(count = stale.len(), "swept stale rounds");
            }
        });
    }
}

/// Returns the user's current betting round, applying the rollover
/// rule: a round already holding `MAX_BETS_PER_ROUND - 1` bets is
/// eagerly finished so the new bet lands in a fresh round.
fn get_or_create_active_round(txn: &mut Transaction, user_id: u32) -> Option<String> {
    if let Some(existing_id) = txn.find_betting_round_for_user(user_id).map(|r| r.round_id.clone()) {
        let bet_count = txn.get_round(&existing_id).unwrap().bets.len();
        if bet_count < MAX_BETS_PER_ROUND - 1 {
            return Some(existing_id);
        }
        txn.get_round_mut(&existing_id).unwrap().finish_betting();
    }

    let user = txn.get_user(user_id)?;
    let room_id = user.current_room?;
    let round = Round::new(user_id, room_id);
    let round_id = round.round_id.clone();
    txn.insert_round(round);
    Some(round_id)
}
