use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dicecade_engine::{CryptoDiceRoller, GameEngine};
use dicecade_state::{ConnectionId, StateStore, StoreConfig};
use tokio::sync::Semaphore;

use crate::config::Config;

/// Everything a connection task needs, cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StateStore>,
    pub engine: Arc<GameEngine>,
    pub connections: Arc<Semaphore>,
    pub cleanup_interval: Duration,
    pub stale_round_timeout: Duration,
    next_conn_id: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let store = Arc::new(StateStore::new(StoreConfig {
            session_timeout: Duration::from_secs(config.session_timeout),
            rate_limit_per_minute: config.rate_limit_per_minute,
        }));
        let engine = Arc::new(GameEngine::new(store.clone(), Box::new(CryptoDiceRoller)));
        Self {
            store,
            engine,
            connections: Arc::new(Semaphore::new(config.max_connections)),
            cleanup_interval: Duration::from_secs(config.cleanup_interval),
            stale_round_timeout: Duration::from_secs(config.stale_round_timeout),
            next_conn_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn mint_connection_id(&self) -> ConnectionId {
        ConnectionId(self.next_conn_id.fetch_add(1, Ordering::Relaxed))
    }
}
