//! End-to-end generation against an in-memory type provider.

use weave_build::Workspace;
use weave_ir::{Field, Manifest, Method, TypeInfo, TypeKind, APPS_SECTION};
use weave_oracle::StaticProvider;
use weavec::commands;

const APP: &str = "acme.io/demo/app.App";
const LOGGER: &str = "acme.io/demo/log.Logger";
const FILE_LOG: &str = "acme.io/demo/file.Log";

fn field(id: &str, kind: TypeKind, field_name: &str) -> Field {
    Field {
        id: id.into(),
        kind,
        type_name: id.rsplit('.').next().unwrap_or_default().into(),
        field_name: field_name.into(),
        pkg_path: id.rsplit_once('.').map(|(p, _)| p.to_string()).unwrap_or_default(),
    }
}

fn info(id: &str, kind: TypeKind, fields: Vec<Field>, methods: Vec<Method>) -> TypeInfo {
    let (pkg_path, name) = id.rsplit_once('.').unwrap();
    TypeInfo {
        id: id.into(),
        kind,
        name: name.into(),
        pkg_path: pkg_path.into(),
        fields,
        methods,
    }
}

fn manifest() -> Manifest {
    let mut m = Manifest::new();
    m.set_section(APPS_SECTION, vec![("demo".into(), APP.into())]);
    m.set_section(
        APP,
        vec![
            ("Name".into(), "\"demo\"".into()),
            ("Count".into(), "5".into()),
            ("Log".into(), FILE_LOG.into()),
        ],
    );
    m
}

fn provider() -> StaticProvider {
    let declared_print = Method {
        name: "Print".into(),
        r#in: vec![field("acme.io/demo/io.Str", TypeKind::Interface, "")],
        out: vec![],
    };
    let offered_print = Method {
        name: "Print".into(),
        r#in: vec![field("acme.io/demo/io.Str2", TypeKind::Interface, "")],
        out: vec![],
    };
    StaticProvider::new(vec![
        info(
            APP,
            TypeKind::Struct,
            vec![field(LOGGER, TypeKind::Interface, "Log")],
            vec![],
        ),
        info(LOGGER, TypeKind::Interface, vec![], vec![declared_print]),
        info(FILE_LOG, TypeKind::Struct, vec![], vec![offered_print]),
    ])
}

#[test]
fn generate_emits_a_complete_wiring_unit() {
    let dir = tempfile::tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    commands::generate(&ws, &provider(), &manifest(), "demo").unwrap();

    let deps = std::fs::read_to_string(ws.app_dir("demo").join("deps.go")).unwrap();
    assert!(deps.starts_with("package main\n\nimport (\n"));
    assert!(deps.contains("func Execute() {\n\tapp := UseAppApp()\n\tapp.Execute()\n}\n"));
    assert!(deps.contains("func UseAppApp() p1.App {"));
    assert!(deps.contains("\tv.Name = \"demo\"\n"));
    assert!(deps.contains("\tv.Count = 5\n"));
    // The incompatible logger goes through a synthesized adapter.
    assert!(deps.contains("\tv.Log = UseFileLogLogLoggerAdapter()\n"));
    assert!(deps.contains("type FileLogLogLoggerAdapter struct {"));
    assert!(deps.contains("func (o *FileLogLogLoggerAdapter) Print("));

    let app = std::fs::read_to_string(ws.app_dir("demo").join("app.go")).unwrap();
    assert!(app.contains("const AppName = \"demo\""));
}

#[test]
fn repeated_generation_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    commands::generate(&ws, &provider(), &manifest(), "demo").unwrap();
    let first = std::fs::read_to_string(ws.app_dir("demo").join("deps.go")).unwrap();
    commands::generate(&ws, &provider(), &manifest(), "demo").unwrap();
    let second = std::fs::read_to_string(ws.app_dir("demo").join("deps.go")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn clean_then_build_reports_the_missing_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    commands::generate(&ws, &provider(), &manifest(), "demo").unwrap();
    commands::clean(&ws, &manifest(), "demo").unwrap();
    assert!(!ws.app_dir("demo").exists());

    let err = commands::build(&ws, "demo").unwrap_err();
    assert!(err.to_string().contains("deps.go"));
}
