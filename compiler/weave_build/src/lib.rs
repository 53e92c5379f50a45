//! Artifact lifecycle for generated applications.
//!
//! Each application owns one directory under the workspace root holding
//! the generated wiring unit (`deps.go`), the bootstrap file (`app.go`)
//! and, after a build, the binary. `build` compiles the directory with
//! the Go toolchain; `clean` removes what generation and builds produced
//! and drops the directory once it is empty again.

mod error;

pub use error::BuildError;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

/// Generated wiring unit file name.
pub const DEPS_FILE: &str = "deps.go";

/// Generated bootstrap file name.
pub const APP_FILE: &str = "app.go";

const MOD_FILE: &str = "go.mod";
const SUM_FILE: &str = "go.sum";

/// A directory of generated applications, one subdirectory per app.
#[derive(Clone, Debug)]
pub struct Workspace {
    root: PathBuf,
    tool: String,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Workspace {
            root: root.into(),
            tool: "go".into(),
        }
    }

    /// Override the toolchain binary, e.g. for a pinned installation.
    pub fn with_tool(root: impl Into<PathBuf>, tool: impl Into<String>) -> Self {
        Workspace {
            root: root.into(),
            tool: tool.into(),
        }
    }

    /// The directory owned by one application.
    pub fn app_dir(&self, application: &str) -> PathBuf {
        self.root.join(application)
    }

    /// Write the generated wiring unit, creating the application
    /// directory if needed. Returns the written path.
    pub fn write_unit(&self, application: &str, unit: &str) -> Result<PathBuf, BuildError> {
        check_application(application)?;
        let dir = self.app_dir(application);
        fs::create_dir_all(&dir)?;
        let path = dir.join(DEPS_FILE);
        fs::write(&path, unit)?;
        debug!(path = %path.display(), "wiring unit written");
        Ok(path)
    }

    /// Write the bootstrap file unless the application already has one;
    /// a hand-edited `app.go` is never overwritten.
    pub fn write_app_file(&self, application: &str) -> Result<(), BuildError> {
        check_application(application)?;
        let dir = self.app_dir(application);
        fs::create_dir_all(&dir)?;
        let path = dir.join(APP_FILE);
        if path.exists() {
            return Ok(());
        }
        let content = format!(
            "package main\n\nconst AppName = \"{application}\"\n\nfunc main() {{\n\tExecute()\n}}\n"
        );
        fs::write(&path, content)?;
        Ok(())
    }

    /// Compile the application directory into `<app>/<app>`.
    ///
    /// Both generated files must exist; a missing one means generation
    /// has not run (or was cleaned) and is reported by path.
    pub fn build(&self, application: &str) -> Result<PathBuf, BuildError> {
        check_application(application)?;
        info!(application, "building application");
        let dir = self.app_dir(application);
        for name in [DEPS_FILE, APP_FILE] {
            let path = dir.join(name);
            if !path.exists() {
                return Err(BuildError::MissingArtifact(path));
            }
        }
        if !modules_disabled() {
            if !dir.join(MOD_FILE).exists() {
                self.run(&dir, ["mod", "init", application])?;
            }
            self.run(&dir, ["mod", "tidy"])?;
        }
        let binary = dir.join(application);
        self.run(
            &dir,
            [
                OsStr::new("build"),
                OsStr::new("-o"),
                binary.as_os_str(),
                OsStr::new("."),
            ],
        )?;
        Ok(binary)
    }

    /// Remove the generated artifacts, the built binary and the module
    /// files, then the application directory if it is empty. A missing
    /// directory is not an error.
    pub fn clean(&self, application: &str) -> Result<(), BuildError> {
        check_application(application)?;
        info!(application, "cleaning application");
        let dir = self.app_dir(application);
        if !dir.exists() {
            return Ok(());
        }
        for name in [DEPS_FILE, APP_FILE, MOD_FILE, SUM_FILE, application] {
            // Best effort; a file may legitimately be absent.
            let _ = fs::remove_file(dir.join(name));
        }
        if dir.read_dir()?.next().is_none() {
            fs::remove_dir(&dir)?;
        }
        Ok(())
    }

    fn run<I, S>(&self, dir: &Path, args: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(&self.tool)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| BuildError::Launch {
                tool: self.tool.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(BuildError::Toolchain {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

fn check_application(application: &str) -> Result<(), BuildError> {
    if application.is_empty() {
        return Err(BuildError::UnnamedApplication);
    }
    Ok(())
}

fn modules_disabled() -> bool {
    std::env::var("GO111MODULE")
        .map(|v| v.eq_ignore_ascii_case("off"))
        .unwrap_or(false)
}
