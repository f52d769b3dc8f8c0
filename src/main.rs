use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use in_n_out_books::config;
use in_n_out_books::database::Fixtures;
use in_n_out_books::{app, AppState};

#[derive(Parser)]
#[command(name = "in-n-out-books")]
#[command(about = "In-N-Out Books API server")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Port to listen on (overrides BOOKS_API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, help = "YAML fixtures to seed the store with (overrides STORE_FIXTURES_PATH)")]
    fixtures: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up APP_ENV, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting In-N-Out Books in {:?} mode", config.environment);

    let fixtures = match cli.fixtures.as_ref().or(config.store.fixtures_path.as_ref()) {
        Some(path) => Fixtures::from_path(path)?,
        None => Fixtures::builtin()?,
    };
    let db = fixtures
        .into_database(config.security.bcrypt_cost)
        .context("failed to seed record store")?;

    let app = app(AppState::new(db, config.security.bcrypt_cost), config);

    let port = cli.port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("In-N-Out Books listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        // Without a signal handler, run until killed
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
