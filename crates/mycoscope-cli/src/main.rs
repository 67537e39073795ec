//! mycoscope: command-line client for mycology research sessions.

mod cli;
mod commands;
mod settings;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let (config, fallback) = match settings::load(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr so event output on stdout stays clean.
    let directive = settings::log_directive(args.log_level.as_deref(), &config);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = fallback {
        tracing::warn!("Config load failed, using defaults: {e}");
    }
    tracing::debug!("mycoscope v{} starting", env!("CARGO_PKG_VERSION"));

    match commands::run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
