//! CLI entrypoint for `upward-config`.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use upward_config_cli::{Args, Outcome, run};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut stdout = io::stdout().lock();
    match run(&args, &mut stdout).await {
        Ok(Outcome::Found) => ExitCode::SUCCESS,
        Ok(Outcome::NotFound) if args.require => {
            tracing::error!(module = %args.module, "no configuration found");
            ExitCode::FAILURE
        }
        Ok(Outcome::NotFound) => {
            tracing::warn!(module = %args.module, "no configuration found");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "configuration search failed");
            ExitCode::from(err.exit_code())
        }
    }
}
