//! Error types for `upward-config`.

use std::sync::Arc;

use thiserror::Error;
use upward_config::UpwardError;

/// Errors surfaced by the `upward-config` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// The search itself failed.
    #[error(transparent)]
    Search(#[from] Arc<UpwardError>),

    /// The result could not be encoded as JSON.
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),

    /// Writing the result failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        2
    }
}
