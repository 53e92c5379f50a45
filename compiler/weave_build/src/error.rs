use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("the application is not specified")]
    UnnamedApplication,

    #[error("the `{}` artifact does not exist", .0.display())]
    MissingArtifact(PathBuf),

    #[error("failed to launch `{tool}`: {source}")]
    Launch { tool: String, source: io::Error },

    #[error("the build tool failed: {stderr}")]
    Toolchain { stderr: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}
