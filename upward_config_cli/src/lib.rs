//! Library half of the `upward-config` binary.
//!
//! [`run`] performs one search described by [`cli::Args`] and prints the
//! result as JSON. The binary only adds logging setup and exit codes, so the
//! whole flow is testable in-process.

use std::io::Write;

use upward_config::{ConfigExplorer, LoadedConfig};

pub mod cli;
pub mod error;

pub use cli::Args;
pub use error::CliError;

/// What a completed run reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A configuration was found and printed.
    Found,
    /// The search completed without finding anything.
    NotFound,
}

/// Searches as `args` describe and writes the result to `out`.
///
/// A found configuration is printed as a pretty JSON object with `filepath`
/// and `config` keys; nothing is printed when no configuration exists.
///
/// # Errors
///
/// Returns [`CliError::Search`] when the search fails, and
/// [`CliError::Encode`] or [`CliError::Output`] when printing fails.
pub async fn run(args: &Args, out: &mut impl Write) -> Result<Outcome, CliError> {
    let explorer = ConfigExplorer::new(args.search_options()).cache(false);
    let found = if args.blocking {
        explorer.search_sync(None)?
    } else {
        explorer.search(None).await?
    };
    let Some(config) = found else {
        return Ok(Outcome::NotFound);
    };
    print_config(&config, out)?;
    Ok(Outcome::Found)
}

fn print_config(config: &LoadedConfig, out: &mut impl Write) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, config)?;
    writeln!(out)?;
    Ok(())
}
