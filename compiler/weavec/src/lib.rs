//! Weave CLI
//!
//! Wires the pipeline crates together behind the `weave` binary: manifest
//! loading, generation, builds, cleanup and the JSON-RPC serving loop.

pub mod commands;
mod error;
pub mod rpc;

pub use error::CliError;
