use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use storage::StorageConfig;

/// Command line options, each with a `RELIC_*` environment fallback.
#[derive(Parser, Debug, Clone)]
#[command(name = "relic-admin", about = "Relic and character build admin server")]
pub struct Cli {
    /// Database URL, e.g. `mysql://root@localhost/kitchen`
    #[arg(long, env = "RELIC_DATABASE_URL", default_value = "sqlite://relics.db?mode=rwc")]
    pub database_url: String,

    /// Address to listen on
    #[arg(long, env = "RELIC_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Size of the database connection pool
    #[arg(long, env = "RELIC_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds to wait for a database connection
    #[arg(long, env = "RELIC_CONNECT_TIMEOUT_SECS", default_value_t = 8)]
    pub connect_timeout_secs: u64,

    /// Directory served under `/static`
    #[arg(long, env = "RELIC_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,
}

impl Cli {
    pub fn storage(&self) -> StorageConfig {
        StorageConfig {
            url: self.database_url.clone(),
            max_connections: self.max_connections,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}
