use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use food_match_router::api;
use food_match_router::config::{Config, LogFormat};
use food_match_router::engine::trigger::trigger_batch;
use food_match_router::error::AppError;
use food_match_router::state::AppState;

#[derive(Parser)]
#[command(name = "food-match-router")]
#[command(about = "Routes surplus restaurant food to NGOs and delivery volunteers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the REST API and dashboard (default)
    Serve,

    /// Run one matching batch, append it to the log and exit
    Run,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    init_tracing(&config);

    let state = Arc::new(AppState::from_config(&config));

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config, state).await,
        Commands::Run => run_once(state).await,
    }
}

fn init_tracing(config: &Config) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false);

    match config.log_format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run_once(state: Arc<AppState>) -> Result<(), AppError> {
    let outcome = trigger_batch(state.clone()).await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({ "count": outcome.results.len() }))?
    );
    println!(
        "Wrote/updated logs at {}",
        state.runner.store().path().display()
    );
    Ok(())
}

async fn serve(config: &Config, state: Arc<AppState>) -> Result<(), AppError> {
    let app = api::rest::router(state);

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(
        http_port = config.http_port,
        data_dir = %config.data_dir.display(),
        log_path = %config.log_path.display(),
        "http server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
