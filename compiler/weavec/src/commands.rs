//! The generate/build/clean operations behind the CLI and the RPC loop.

use std::path::{Path, PathBuf};

use tracing::info;
use weave_build::{BuildError, Workspace};
use weave_ir::Manifest;
use weave_oracle::TypeProvider;
use weave_resolve::Resolver;

use crate::CliError;

/// Load a wiring manifest from a JSON file.
pub fn load_manifest(path: &Path) -> Result<Manifest, CliError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Resolve the application's wiring and write `deps.go` (and `app.go`
/// when missing) into its directory. A failed generation writes nothing.
pub fn generate<P: TypeProvider>(
    workspace: &Workspace,
    provider: &P,
    manifest: &Manifest,
    application: &str,
) -> Result<(), CliError> {
    info!(application, "generating application");
    let resolution = Resolver::new(manifest, provider).resolve_application(application)?;
    let unit = weave_codegen::generate_unit(&resolution.graph, &resolution.types)?;
    workspace.write_unit(application, &unit)?;
    workspace.write_app_file(application)?;
    Ok(())
}

/// Compile a previously generated application; returns the binary path.
pub fn build(workspace: &Workspace, application: &str) -> Result<PathBuf, CliError> {
    Ok(workspace.build(application)?)
}

/// Remove the application's generated artifacts. Applications the
/// manifest does not declare are left untouched.
pub fn clean(
    workspace: &Workspace,
    manifest: &Manifest,
    application: &str,
) -> Result<(), CliError> {
    if application.is_empty() {
        return Err(BuildError::UnnamedApplication.into());
    }
    if manifest.entry_spec(application).is_none() {
        return Ok(());
    }
    Ok(workspace.clean(application)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use weave_ir::{Manifest, TypeInfo, TypeKind, APPS_SECTION};
    use weave_oracle::StaticProvider;

    fn manifest() -> Manifest {
        let mut m = Manifest::new();
        m.set_section(
            APPS_SECTION,
            vec![("demo".into(), "acme.io/demo/app.App".into())],
        );
        m.set_section(
            "acme.io/demo/app.App",
            vec![("Name".into(), "\"demo\"".into())],
        );
        m
    }

    fn provider() -> StaticProvider {
        StaticProvider::new(vec![TypeInfo {
            id: "acme.io/demo/app.App".into(),
            kind: TypeKind::Struct,
            name: "App".into(),
            pkg_path: "acme.io/demo/app".into(),
            fields: Vec::new(),
            methods: Vec::new(),
        }])
    }

    #[test]
    fn generate_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path());
        generate(&ws, &provider(), &manifest(), "demo").unwrap();

        let deps = std::fs::read_to_string(ws.app_dir("demo").join("deps.go")).unwrap();
        assert!(deps.contains("func UseAppApp() p1.App {"));
        assert!(deps.contains("\tv.Name = \"demo\"\n"));
        assert!(ws.app_dir("demo").join("app.go").exists());
    }

    #[test]
    fn failed_generation_leaves_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path());
        // The provider never describes App, so resolution fails.
        let empty = StaticProvider::new(vec![]);
        assert!(generate(&ws, &empty, &manifest(), "demo").is_err());
        assert!(!ws.app_dir("demo").exists());
    }

    #[test]
    fn clean_ignores_undeclared_applications() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path());
        ws.write_unit("stranger", "package main\n").unwrap();
        clean(&ws, &manifest(), "stranger").unwrap();
        assert!(ws.app_dir("stranger").join("deps.go").exists());
    }

    #[test]
    fn clean_removes_declared_application_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path());
        generate(&ws, &provider(), &manifest(), "demo").unwrap();
        clean(&ws, &manifest(), "demo").unwrap();
        assert!(!ws.app_dir("demo").exists());
    }
}
