//! The production provider: a Go reflection probe run by the Go toolchain.

use std::path::Path;
use std::process::Command;

use tracing::debug;
use weave_ir::TypeInfo;

use crate::{probe, OracleError, TypeCandidate, TypeProvider};

/// Resolves types by generating and running a reflection probe with the
/// `go` toolchain in a fresh scratch workspace per call.
///
/// The call blocks until the toolchain finishes; there is no timeout or
/// cancellation. Scratch cleanup is best-effort (temp dir drop).
#[derive(Clone, Debug)]
pub struct GoToolchain {
    tool: String,
}

impl Default for GoToolchain {
    fn default() -> Self {
        GoToolchain::new()
    }
}

impl GoToolchain {
    pub fn new() -> Self {
        GoToolchain { tool: "go".into() }
    }

    /// Override the toolchain binary, e.g. for a pinned installation.
    pub fn with_tool(tool: impl Into<String>) -> Self {
        GoToolchain { tool: tool.into() }
    }

    fn run(&self, dir: &Path, args: &[&str]) -> Result<Vec<u8>, OracleError> {
        debug!(tool = %self.tool, ?args, "running toolchain");
        let output = Command::new(&self.tool)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| OracleError::Launch {
                tool: self.tool.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(OracleError::Exit {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(output.stdout)
    }

    fn modules_disabled() -> bool {
        std::env::var("GO111MODULE")
            .map(|v| v.eq_ignore_ascii_case("off"))
            .unwrap_or(false)
    }
}

impl TypeProvider for GoToolchain {
    fn resolve_types(&self, candidates: &[TypeCandidate]) -> Result<Vec<TypeInfo>, OracleError> {
        let Some(program) = probe::render(candidates) else {
            return Ok(Vec::new());
        };
        let workspace = tempfile::tempdir()?;
        std::fs::write(workspace.path().join("main.go"), program)?;
        if !Self::modules_disabled() {
            self.run(workspace.path(), &["mod", "init", "weave_probe"])?;
            self.run(workspace.path(), &["mod", "tidy"])?;
        }
        let stdout = self.run(workspace.path(), &["run", "main.go"])?;
        let infos: Vec<TypeInfo> = serde_json::from_slice(&stdout)?;
        debug!(count = infos.len(), "probe returned type descriptions");
        Ok(infos)
    }
}
