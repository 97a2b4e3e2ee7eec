//! WebSocket connection handling, dispatch, and process lifecycle for
//! the dice arena server. Split into a library so integration tests
//! can drive a real listener end to end.

pub mod app_state;
pub mod config;
pub mod dispatcher;
pub mod handlers;
pub mod lifecycle;

pub use app_state::AppState;
pub use config::Config;
