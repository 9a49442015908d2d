//! Respace - room redesign backend.

use std::path::Path;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use respace::cli::Cli;
use respace::config::{discover_config_path, Config};
use respace::context::ServiceContext;
use respace::error::ServerError;
use respace::model::{resolve_model, validate_model};
use respace::server::{router, AppState, RouterSettings};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    // Load config: file, then environment, then flags
    let config_path = discover_config_path(cli.config.as_deref());
    let mut config = Config::load(&config_path).map_err(ServerError::Config)?;
    config.apply_env().map_err(ServerError::Config)?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let model = resolve_model(&config.generation.model);
    validate_model(&model).map_err(ServerError::InvalidArgument)?;
    tracing::debug!(
        config = %config_path.display(),
        model = %model,
        requested = %config.generation.model,
        "configuration loaded"
    );

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("RESPACE_REPLAY").ok();
    let is_recording = std::env::var("RESPACE_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        tracing::info!(cassette = %cassette_path, "replaying generator responses");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        tracing::info!("recording generator interactions");
        let (ctx, session) = ServiceContext::recording(&config);
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config), None)
    };

    let state = Arc::new(AppState { generator: ctx.generator, model });
    let app = router(
        state,
        &RouterSettings {
            allowed_origins: config.server.allowed_origins.clone(),
            max_upload_bytes: config.server.max_upload_bytes,
        },
    )?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        origins = ?config.server.allowed_origins,
        "listening"
    );

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    // Finish recording if active
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => tracing::info!(path = %path.display(), "cassette saved"),
            Err(e) => tracing::warn!(error = %e, "failed to save cassette"),
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
