use std::sync::Arc;
use std::time::Duration;

use dicecade_domain::RoundStatusView;
use dicecade_engine::{FixedDiceRoller, GameEngine};
use dicecade_state::{StateStore, StoreConfig};

fn engine_with_roll(face: u32) -> (Arc<StateStore>, GameEngine) {
    let store = Arc::new(StateStore::new(StoreConfig {
        session_timeout: Duration::from_secs(1800),
        rate_limit_per_minute: 100,
    }));
    let engine = GameEngine::new(store.clone(), Box::new(FixedDiceRoller(face)));
    (store, engine)
}

fn login_and_join(store: &StateStore, username: &str, password: &str, room_id: u32) -> u32 {
    let user = store.authenticate(username, password).expect("seed credentials");
    assert!(store.join_room(user.user_id, room_id));
    user.user_id
}

#[test]
fn happy_path_winning_bet_pays_six_times() {
    let (store, engine) = engine_with_roll(4);
    let user_id = login_and_join(&store, "alice", "alicepass", 1);

    let placed = engine.place_bet(user_id, 4, 100, None);
    assert!(placed.ok, "{}", placed.message);
    assert_eq!(placed.remaining_balance, 900);

    let finished = engine.finish_betting(user_id, &placed.round_id);
    assert!(finished.ok, "{}", finished.message);

    let settled = engine.settle(user_id, &placed.round_id);
    assert!(settled.ok, "{}", settled.message);
    assert_eq!(settled.dice_result, 4);
    assert_eq!(settled.total_winnings, 600);
    assert_eq!(settled.new_balance, 900 + 600);
    assert_eq!(settled.bet_results.len(), 1);
    assert!(settled.bet_results[0].won);
    assert_eq!(settled.bet_results[0].payout, 600);
}

#[test]
fn losing_bet_pays_nothing() {
    let (store, engine) = engine_with_roll(2);
    let user_id = login_and_join(&store, "alice", "alicepass", 1);

    let placed = engine.place_bet(user_id, 5, 100, None);
    assert!(placed.ok);
    engine.finish_betting(user_id, &placed.round_id);

    let settled = engine.settle(user_id, &placed.round_id);
    assert!(settled.ok);
    assert_eq!(settled.total_winnings, 0);
    assert_eq!(settled.new_balance, 900);
    assert!(!settled.bet_results[0].won);
}

#[test]
fn bet_above_balance_is_rejected() {
    let (store, engine) = engine_with_roll(1);
    let user_id = login_and_join(&store, "alice", "alicepass", 1);

    let placed = engine.place_bet(user_id, 3, 5_000, None);
    assert!(!placed.ok);
    assert_eq!(placed.message, "Insufficient balance");
    assert_eq!(placed.remaining_balance, 1000);
}

#[test]
fn invalid_dice_face_is_rejected_before_balance_check() {
    let (store, engine) = engine_with_roll(1);
    let user_id = login_and_join(&store, "alice", "alicepass", 1);

    let placed = engine.place_bet(user_id, 7, 100, None);
    assert!(!placed.ok);
    assert_eq!(placed.message, "Invalid dice face (must be 1-6)");
}

#[test]
fn finish_betting_on_missing_round_is_idempotent_ok() {
    let (_store, engine) = engine_with_roll(1);
    let outcome = engine.finish_betting(42, "does-not-exist");
    assert!(outcome.ok);
    assert_eq!(outcome.message, "Round already processed");
}

#[test]
fn settle_on_missing_round_returns_stub_values() {
    let (_store, engine) = engine_with_roll(1);
    let settled = engine.settle(42, "does-not-exist");
    assert!(settled.ok);
    assert_eq!(settled.dice_result, 3);
    assert!(settled.bet_results.is_empty());
    assert_eq!(settled.total_winnings, 0);
    assert_eq!(settled.new_balance, 0);
    assert_eq!(settled.jackpot_pool, 0);
}

#[test]
fn double_settle_is_idempotent() {
    let (store, engine) = engine_with_roll(6);
    let user_id = login_and_join(&store, "alice", "alicepass", 1);
    let placed = engine.place_bet(user_id, 6, 100, None);
    engine.finish_betting(user_id, &placed.round_id);

    let first = engine.settle(user_id, &placed.round_id);
    assert!(first.ok);
    assert_eq!(first.total_winnings, 600);

    let second = engine.settle(user_id, &placed.round_id);
    assert!(second.ok);
    assert_eq!(second.dice_result, 3);
    assert_eq!(second.total_winnings, 0);
}

#[test]
fn tenth_bet_rolls_over_into_a_fresh_round() {
    let (store, engine) = engine_with_roll(1);
    let user_id = login_and_join(&store, "alice", "alicepass", 1);

    let mut round_ids = Vec::new();
    for _ in 0..9 {
        let placed = engine.place_bet(user_id, 2, 10, None);
        assert!(placed.ok, "{}", placed.message);
        round_ids.push(placed.round_id);
    }
    assert!(round_ids.windows(2).all(|w| w[0] == w[1]));

    let tenth = engine.place_bet(user_id, 2, 10, None);
    assert!(tenth.ok, "{}", tenth.message);
    assert_ne!(tenth.round_id, round_ids[0]);
}

#[test]
fn finishing_without_bets_fails() {
    let (store, engine) = engine_with_roll(1);
    let user_id = login_and_join(&store, "alice", "alicepass", 1);
    let snapshot = engine.snapshot(user_id).unwrap();
    assert_eq!(snapshot.round_status, RoundStatusView::NoActiveRound);
}

#[test]
fn snapshot_reports_active_bets_before_settlement() {
    let (store, engine) = engine_with_roll(1);
    let user_id = login_and_join(&store, "alice", "alicepass", 1);
    let placed = engine.place_bet(user_id, 2, 50, None);
    assert!(placed.ok);

    let snapshot = engine.snapshot(user_id).unwrap();
    assert_eq!(snapshot.round_status, RoundStatusView::Betting);
    assert_eq!(snapshot.active_bets.len(), 1);
    assert_eq!(snapshot.user_balance, 950);
    assert_eq!(snapshot.current_room, 1);
}

#[test]
fn jackpot_accrues_to_the_room_the_user_is_in_at_settle_time() {
    let (store, engine) = engine_with_roll(1);
    let user_id = login_and_join(&store, "alice", "alicepass", 1);

    let placed = engine.place_bet(user_id, 2, 100, None);
    assert!(placed.ok, "{}", placed.message);
    engine.finish_betting(user_id, &placed.round_id);

    // Switch rooms before the round is settled: the pending round still
    // carries the old room_id, but the jackpot contribution should land
    // in the room the user is in now, not the one the round was opened in.
    assert!(store.join_room(user_id, 2));

    let settled = engine.settle(user_id, &placed.round_id);
    assert!(settled.ok, "{}", settled.message);
    assert_eq!(settled.jackpot_pool, 1);

    store.transact(|txn| {
        assert_eq!(txn.get_room(1).unwrap().jackpot_pool, 0);
        assert_eq!(txn.get_room(2).unwrap().jackpot_pool, 1);
    });
}

#[test]
fn jackpot_contribution_is_zero_when_user_has_left_every_room() {
    let (store, engine) = engine_with_roll(1);
    let user_id = login_and_join(&store, "alice", "alicepass", 1);

    let placed = engine.place_bet(user_id, 2, 100, None);
    assert!(placed.ok, "{}", placed.message);
    engine.finish_betting(user_id, &placed.round_id);

    store.leave_room(user_id);

    let settled = engine.settle(user_id, &placed.round_id);
    assert!(settled.ok, "{}", settled.message);
    assert_eq!(settled.jackpot_pool, 0);

    store.transact(|txn| {
        assert_eq!(txn.get_room(1).unwrap().jackpot_pool, 0);
    });
}
