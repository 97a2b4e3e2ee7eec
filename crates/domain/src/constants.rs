//! Game-wide constants shared by every crate that needs them.
//!
//! These are invariants of the domain model itself rather than
//! deployment knobs, so they live here as the single source of truth
//! instead of in the server crate's runtime `Config`.

/// Dice has six faces, numbered 1..=6.
pub const MIN_DICE_FACE: u32 = 1;
pub const MAX_DICE_FACE: u32 = 6;

/// A winning bet pays out at 6x — fair odds on a uniform six-sided die.
pub const PAYOUT_MULTIPLIER: i64 = 6;

/// Bet amount bounds, in minor units.
pub const MIN_BET: i64 = 1;
pub const MAX_BET: i64 = 1000;

/// At most this many bets may accumulate in a single round before it is
/// forced into settlement.
pub const MAX_BETS_PER_ROUND: usize = 10;

/// Starting balance credited to freshly created users.
pub const DEFAULT_BALANCE: i64 = 1000;

/// Number of default rooms bootstrapped at startup.
pub const DEFAULT_ROOM_COUNT: u32 = 10;

/// Default per-room player capacity.
pub const MAX_ROOM_CAPACITY: u32 = 50;
