use thiserror::Error;

/// Work factor for the adaptive hash.
pub const BCRYPT_COST: u32 = 12;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password")]
    HashFailure,
}

/// Hashes a plaintext password with a fresh per-call salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|_| PasswordError::HashFailure)
}

/// Verifies a plaintext password against a stored hash. `bcrypt`'s
/// comparison is constant-time with respect to the hash contents.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_correct_password() {
        let hash = hash_password("alicepass").unwrap();
        assert!(verify_password("alicepass", &hash));
    }

    #[test]
    fn rejects_a_wrong_password() {
        let hash = hash_password("alicepass").unwrap();
        assert!(!verify_password("wrongpass", &hash));
    }

    #[test]
    fn malformed_hash_is_rejected_not_panicking() {
        assert!(!verify_password("anything", "not-a-real-hash"));
    }
}
