use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

use drivescope_core::DbConfig;
use drivescope_db::{run_migrations, InMemoryCarStore, PgCarRepository};
use drivescope_server::{build_router, cors_layer, AppState, Command, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Setup logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    match &config.command {
        Command::Serve { in_memory } => {
            let state = if *in_memory {
                info!("Using in-memory store; data is lost on exit");
                AppState::new(InMemoryCarStore::new())
            } else {
                let pool = connect(&config).await?;
                run_migrations(&pool)
                    .await
                    .context("Failed to apply database migrations")?;
                AppState::new(PgCarRepository::new(pool))
            };
            serve(state, &config).await?;
        }
        Command::Migrate => {
            let pool = connect(&config).await?;
            run_migrations(&pool)
                .await
                .context("Failed to apply database migrations")?;
            info!("Migrations applied");
        }
    }

    Ok(())
}

async fn connect(config: &Config) -> anyhow::Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required unless serving with --in-memory")?;

    info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(DbConfig::default().acquire_timeout)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

async fn serve(state: AppState, config: &Config) -> anyhow::Result<()> {
    let app = build_router(state, cors_layer(&config.cors_allow_origins));
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
}
