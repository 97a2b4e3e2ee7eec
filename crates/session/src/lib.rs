//! Authentication primitives: password hashing, session tokens, and
//! rate limiting. Pure logic with no knowledge of the process-wide
//! state store or the network layer — `dicecade-state` is the one
//! place that wires these into the guarded game state.

pub mod password;
pub mod rate_limiter;
pub mod token;

pub use password::{hash_password, verify_password, PasswordError};
pub use rate_limiter::RateLimiterTable;
pub use token::generate_session_token;
