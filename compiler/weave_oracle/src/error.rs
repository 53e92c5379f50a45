//! Oracle failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    /// The external toolchain could not be started at all.
    #[error("cannot launch `{tool}`: {source}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The probe ran and exited non-zero; the diagnostic stream is kept.
    #[error("the type probe failed: {stderr}")]
    Exit { stderr: String },

    /// The probe output was not a valid type description list.
    #[error("cannot decode the type probe output: {0}")]
    Decode(#[from] serde_json::Error),

    /// Scratch workspace management failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
