//! Parse failures.

use thiserror::Error;

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum ParseError {
    #[error("cannot get a group name, the `]` is missing in `{0}`")]
    GroupUnterminated(String),

    #[error("incorrect syntax, the `(` is missing in `{0}`")]
    MissingOpenParen(String),

    #[error("incorrect syntax, the `)` is missing in `{0}`")]
    UnbalancedParens(String),

    #[error("cannot detect the kind of `{0}`")]
    UnrecognizedSpec(String),
}
