use dicecade_domain::constants::{MAX_DICE_FACE, MIN_DICE_FACE};
use rand::rngs::OsRng;
use rand::Rng;

/// Draws a uniform dice result. Abstracted behind a trait so tests can
/// inject a fixed sequence — settlement math must be exercised against
/// known rolls.
pub trait DiceRoller: Send + Sync {
    fn roll(&self) -> u32;
}

/// Production roller: a fresh, cryptographically seeded draw from the
/// OS CSPRNG every call.
#[derive(Debug, Default)]
pub struct CryptoDiceRoller;

impl DiceRoller for CryptoDiceRoller {
    fn roll(&self) -> u32 {
        OsRng.gen_range(MIN_DICE_FACE..=MAX_DICE_FACE)
    }
}

/// Test double that always returns the same face.
#[derive(Debug, Clone, Copy)]
pub struct FixedDiceRoller(pub u32);

impl DiceRoller for FixedDiceRoller {
    fn roll(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crypto_roller_stays_in_range() {
        let roller = CryptoDiceRoller;
        for _ in 0..100 {
            let face = roller.roll();
            assert!((MIN_DICE_FACE..=MAX_DICE_FACE).contains(&face));
        }
    }

    #[test]
    fn fixed_roller_is_fixed() {
        let roller = FixedDiceRoller(4);
        assert_eq!(roller.roll(), 4);
        assert_eq!(roller.roll(), 4);
    }
}
