use clap::{Parser, Subcommand};
use drivescope_core::DbConfig;

/// Server configuration parsed from command line arguments and environment variables
#[derive(Parser, Debug)]
#[command(name = "drivescope")]
#[command(
    author,
    version,
    about = "Used car listing search and price alert API"
)]
#[command(after_help = "Examples:
  drivescope serve
  drivescope serve --in-memory --bind-addr 127.0.0.1:8000
  drivescope migrate")]
pub struct Config {
    /// PostgreSQL database connection URL (not needed with --in-memory)
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Address the HTTP server binds to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000", global = true)]
    pub bind_addr: String,

    /// Maximum number of pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = DbConfig::default().max_connections, global = true)]
    pub db_max_connections: u32,

    /// Comma-separated list of allowed CORS origins; empty allows any origin
    #[arg(long, env = "CORS_ALLOW_ORIGINS", value_delimiter = ',', global = true)]
    pub cors_allow_origins: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Apply pending migrations, then serve the HTTP API
    #[command(after_help = "Example: drivescope serve --bind-addr 0.0.0.0:8080")]
    Serve {
        /// Serve from a process-local in-memory store instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },
    /// Apply pending database migrations and exit
    Migrate,
}
