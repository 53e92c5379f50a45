use std::io;

use thiserror::Error;
use weave_build::BuildError;
use weave_codegen::CodegenError;
use weave_resolve::ResolveError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("failed to read the manifest: {0}")]
    ManifestRead(#[from] io::Error),

    #[error("failed to decode the manifest: {0}")]
    ManifestDecode(#[from] serde_json::Error),
}
