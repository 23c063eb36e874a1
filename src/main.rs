mod cli;
mod commands;
mod error;
mod output;

use std::future::Future;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use zendesk::Zendesk;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let _ = dotenvy::dotenv(); // load .env if present

    let client = match Zendesk::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "failed to configure client");
            std::process::exit(1);
        }
    };

    // Ctrl-C or SIGTERM cancels whatever request is in flight.
    let cancel = cancel_on(shutdown_signal());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = commands::run(&client, cli.command, &cancel, &mut out).await {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

/// Cancel the returned token once `signal` resolves, stopping any request
/// still in flight.
fn cancel_on<F>(signal: F) -> CancellationToken
where
    F: Future<Output = &'static str> + Send + 'static,
{
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        let name = signal.await;
        info!(signal = name, "zd interrupted, cancelling requests");
        token.cancel();
    });
    cancel
}

#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => tokio::select! {
            _ = tokio::signal::ctrl_c() => "SIGINT",
            _ = term.recv() => "SIGTERM",
        },
        Err(e) => {
            tracing::warn!(error = %e, "SIGTERM handler unavailable");
            let _ = tokio::signal::ctrl_c().await;
            "SIGINT"
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    let _ = tokio::signal::ctrl_c().await;
    "SIGINT"
}
