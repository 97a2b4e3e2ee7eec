use clap::Parser;

/// Runtime configuration, sourced from the environment with CLI overrides.
///
/// `MIN_BET`, `MAX_BET`, `DEFAULT_BALANCE`, `DEFAULT_ROOM_COUNT`,
/// `MAX_ROOM_CAPACITY`, and `MAX_BETS_PER_ROUND` are not here: they're
/// baked in as `dicecade_domain::constants` rather than threaded through
/// at runtime, since the domain and state crates already close over
/// those values at compile time.
#[derive(Parser, Debug, Clone)]
#[command(name = "dicecade-server", about = "Dice gambling arena game server")]
pub struct Config {
    #[arg(long, env = "HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8765)]
    pub port: u16,

    #[arg(long, env = "MAX_CONNECTIONS", default_value_t = 100)]
    pub max_connections: usize,

    #[arg(long, env = "SESSION_TIMEOUT", default_value_t = 1800)]
    pub session_timeout: u64,

    #[arg(long, env = "STALE_ROUND_TIMEOUT", default_value_t = 600)]
    pub stale_round_timeout: u64,

    #[arg(long, env = "CLEANUP_INTERVAL", default_value_t = 300)]
    pub cleanup_interval: u64,

    #[arg(long, env = "RATE_LIMIT_PER_MINUTE", default_value_t = 100)]
    pub rate_limit_per_minute: u32,
}
