use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use ck_app::{ClipboardEngine, ClipboardEngineHandle};
use ck_core::{ClipboardEntry, Subscription};
use tracing::{info, warn};

use super::cli::Cli;
use super::config::load_settings;
use super::paths::AppPaths;
use super::tracing::init_tracing_subscriber;
use super::wiring::build_system_engine;

/// Binary entry point: logging, settings, engine, then run until Ctrl-C.
pub async fn run_app(cli: Cli) -> anyhow::Result<()> {
    let paths = AppPaths::resolve();
    let logs_dir = match (&paths, cli.no_file_log) {
        (Ok(paths), false) => Some(paths.logs_dir.clone()),
        _ => None,
    };
    init_tracing_subscriber(logs_dir.as_deref())?;

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path(paths)?,
    };
    let config = load_settings(&config_path)?
        .to_engine_config()
        .with_context(|| format!("Invalid settings in {}", config_path.display()))?;

    let engine = build_system_engine(config)?;
    run_until(engine, shutdown_signal()).await
}

fn default_config_path(paths: anyhow::Result<AppPaths>) -> anyhow::Result<PathBuf> {
    Ok(paths
        .context("Cannot locate the settings file, pass --config")?
        .config_file)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for Ctrl-C, shutting down");
    }
}

/// Spawn `engine`, start monitoring and keep going until `shutdown`
/// resolves.
pub async fn run_until(
    engine: ClipboardEngine,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let (handle, runtime) = engine.spawn();
    let _subscription = log_history_changes(&handle);

    handle.start().await?;
    info!("clipkeep is watching the clipboard, press Ctrl-C to exit");

    shutdown.await;

    info!(entries = handle.len(), "Shutting down");
    handle.shutdown().await?;
    runtime.await.context("Clipboard monitor runtime panicked")?;
    Ok(())
}

fn log_history_changes(handle: &ClipboardEngineHandle) -> Subscription {
    handle.subscribe(|view: &[Arc<ClipboardEntry>]| match view.first() {
        Some(newest) => info!(
            entries = view.len(),
            category = %newest.category(),
            preview = newest.preview_text(),
            "History updated"
        ),
        None => info!("History cleared"),
    })
}
