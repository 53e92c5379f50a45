//! Weave CLI
//!
//! Build-time dependency injection for Go applications.

use std::io::{stdin, stdout};
use std::path::{Path, PathBuf};

use weave_build::Workspace;
use weave_oracle::GoToolchain;
use weavec::{commands, rpc};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let workspace = Workspace::new(".");
    let provider = GoToolchain::new();

    match args[1].as_str() {
        "generate" => {
            let (app, manifest_path) = parse_app_args(&args[2..], "weave generate");
            let manifest = load_manifest_or_exit(&manifest_path);
            if let Err(err) = commands::generate(&workspace, &provider, &manifest, &app) {
                fail(&err.to_string());
            }
            println!("generated \"{app}\"");
        }
        "build" => {
            let (app, _) = parse_app_args(&args[2..], "weave build");
            match commands::build(&workspace, &app) {
                Ok(binary) => println!("built {}", binary.display()),
                Err(err) => fail(&err.to_string()),
            }
        }
        "clean" => {
            let (app, manifest_path) = parse_app_args(&args[2..], "weave clean");
            let manifest = load_manifest_or_exit(&manifest_path);
            if let Err(err) = commands::clean(&workspace, &manifest, &app) {
                fail(&err.to_string());
            }
        }
        "serve" => {
            let input = stdin().lock();
            let mut output = stdout().lock();
            if let Err(err) = rpc::serve(&workspace, &provider, input, &mut output) {
                fail(&err.to_string());
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("weave {}", env!("CARGO_PKG_VERSION"));
        }
        command => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// Extract the application name and the `--manifest=` override from the
/// command's trailing arguments.
fn parse_app_args(args: &[String], usage: &str) -> (String, PathBuf) {
    let mut app = None;
    let mut manifest = PathBuf::from("weave.json");
    for arg in args {
        if let Some(path) = arg.strip_prefix("--manifest=") {
            manifest = PathBuf::from(path);
        } else if !arg.starts_with('-') && app.is_none() {
            app = Some(arg.clone());
        }
    }
    let Some(app) = app else {
        eprintln!("error: missing application name");
        eprintln!("Usage: {usage} <application> [--manifest=<path>]");
        std::process::exit(1);
    };
    (app, manifest)
}

fn load_manifest_or_exit(path: &Path) -> weave_ir::Manifest {
    match commands::load_manifest(path) {
        Ok(manifest) => manifest,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

fn print_usage() {
    println!("Weave (build-time dependency injection for Go)");
    println!();
    println!("Usage: weave <command> [options]");
    println!();
    println!("Commands:");
    println!("  generate <app>   Resolve the wiring and write deps.go/app.go");
    println!("  build <app>      Compile a generated application");
    println!("  clean <app>      Remove generated and built artifacts");
    println!("  serve            Answer JSON requests on stdin/stdout");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Options:");
    println!("  --manifest=<path>   Wiring manifest (default: weave.json)");
    println!();
    println!("Examples:");
    println!("  weave generate demo");
    println!("  weave generate demo --manifest=wiring.json");
    println!("  weave build demo");
    println!("  weave clean demo");
}
