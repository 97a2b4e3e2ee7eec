//! Plain data types for the dice arena's domain model: users, rooms,
//! bets, and rounds, plus the invariants attached directly to them.
//!
//! This crate knows nothing about the network, storage, or concurrency
//! model — those live in `dicecade-state`, `dicecade-session`, and
//! `dicecade-server` respectively. Keeping the domain types free of
//! those concerns is what lets `dicecade-engine` unit test settlement
//! math without spinning up a store or a socket.

pub mod bet;
pub mod constants;
pub mod room;
pub mod round;
pub mod snapshot;
pub mod user;

pub use bet::{Bet, BetOutcome};
pub use room::Room;
pub use round::{Round, RoundStatus};
pub use snapshot::RoundStatusView;
pub use user::User;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bet_settles_win_at_six_times_payout() {
        let mut bet = Bet::new(1, "r1", 4, 100);
        bet.settle(4);
        assert!(bet.won());
        assert_eq!(bet.payout, 600);
    }

    #[test]
    fn bet_settles_loss_at_zero_payout() {
        let mut bet = Bet::new(1, "r1", 4, 100);
        bet.settle(5);
        assert!(!bet.won());
        assert_eq!(bet.payout, 0);
    }

    #[test]
    fn room_rejects_players_past_capacity() {
        let mut room = Room::new(1, "Room 1", 1);
        assert!(room.add_player(10));
        assert!(!room.add_player(11));
        assert_eq!(room.player_count(), 1);
    }

    #[test]
    fn round_settlement_sums_every_bet() {
        let mut round = Round::new(1, 1);
        round.push_bet(Bet::new(1, round.round_id.clone(), 3, 100));
        round.push_bet(Bet::new(1, round.round_id.clone(), 4, 50));
        let total = round.settle(3);
        assert_eq!(total, 600);
        assert_eq!(round.total_winnings, 600);
        assert_eq!(round.total_bet_amount(), 150);
    }
}
