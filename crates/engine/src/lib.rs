//! Bet validation, round lifecycle, and settlement math — spec
//! component E. Operates exclusively through `dicecade_state::StateStore`,
//! never holding state of its own, so every gameplay action composes
//! with the store's single mutex instead of racing it.

pub mod dice;
pub mod engine;
pub mod views;

pub use dice::{CryptoDiceRoller, DiceRoller, FixedDiceRoller};
pub use engine::GameEngine;
pub use views::{BetResultView, BetView, FinishBettingOutcome, PlaceBetOutcome, SettleOutcome, SnapshotView};
