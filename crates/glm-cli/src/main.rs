mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use glm_gitlab::GitlabClient;
use glm_runner::{RunError, ShellExecutor};

use crate::cli::Cli;
use crate::commands::Outputs;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env first so it can supply RUST_LOG as well as env-backed flags.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => tracing::debug!("no .env file"),
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = cli.into_settings()?;
    settings.validate()?;
    tracing::debug!(?settings, "settings resolved");

    let client = GitlabClient::from_settings(&settings)?;
    commands::run(&settings, &client, &ShellExecutor, &Outputs::default()).await
}

/// The script's own exit code when it failed, 1 for everything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<RunError>()
        .and_then(RunError::exit_code)
        // arch-lint: allow(no-silent-result-drop) reason="codes outside 0..=255 fall back to the generic failure code"
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}
