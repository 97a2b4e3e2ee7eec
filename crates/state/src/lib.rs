//! Process-wide game state.
//!
//! Everything mutable lives behind one [`StateStore`], guarded by one
//! mutex. Bootstrapping creates the default rooms and seed users the
//! moment a store is built.

pub mod bootstrap;
pub mod connection;
pub mod store;
pub mod transaction;

pub use connection::ConnectionId;
pub use store::{StateStore, StoreConfig};
pub use transaction::Transaction;
