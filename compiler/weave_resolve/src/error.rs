//! Resolution failures.

use thiserror::Error;
use weave_oracle::OracleError;
use weave_parse::ParseError;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// Self-referential wiring; the original left this undefined, here it
    /// is rejected outright.
    #[error("the wiring for `{0}` is self-referential")]
    Cycle(String),

    /// A struct item survived expansion without a type description.
    #[error("the `{0}` type was not described by the type oracle")]
    MissingType(String),

    #[error("the selected `{0}` application does not exist")]
    MissingApplication(String),

    #[error("the application is not specified")]
    UnnamedApplication,
}
