//! Remote transport: newline-delimited JSON over any reader/writer pair.
//!
//! Each request carries the operation, the application name and, for
//! generate and clean, the wiring table itself, so the serving process
//! needs no manifest of its own. Responses report success or the error
//! text, nothing more.

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};
use tracing::info;
use weave_build::Workspace;
use weave_ir::Manifest;
use weave_oracle::TypeProvider;

use crate::commands;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Request {
    Generate { app: String, sources: Manifest },
    Build { app: String },
    Clean { app: String, sources: Manifest },
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    fn ok() -> Self {
        Response {
            ok: true,
            error: None,
        }
    }

    fn error(text: String) -> Self {
        Response {
            ok: false,
            error: Some(text),
        }
    }
}

/// Serve requests until the input ends, one JSON object per line in and
/// one per line out.
pub fn serve<P, R, W>(
    workspace: &Workspace,
    provider: &P,
    input: R,
    output: &mut W,
) -> io::Result<()>
where
    P: TypeProvider,
    R: BufRead,
    W: Write,
{
    info!("serving wiring requests");
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => dispatch(workspace, provider, request),
            Err(err) => Response::error(format!("bad request: {err}")),
        };
        let text = serde_json::to_string(&response).map_err(io::Error::other)?;
        writeln!(output, "{text}")?;
        output.flush()?;
    }
    Ok(())
}

fn dispatch<P: TypeProvider>(workspace: &Workspace, provider: &P, request: Request) -> Response {
    let result = match request {
        Request::Generate { app, sources } => {
            commands::generate(workspace, provider, &sources, &app)
        }
        Request::Build { app } => commands::build(workspace, &app).map(|_| ()),
        Request::Clean { app, sources } => commands::clean(workspace, &sources, &app),
    };
    match result {
        Ok(()) => Response::ok(),
        Err(err) => Response::error(err.to_string()),
    }
}
