use thiserror::Error;
use weave_typeck::CompatError;

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum CodegenError {
    #[error(transparent)]
    Compat(#[from] CompatError),

    #[error("the construction graph has no entry item")]
    MissingEntry,

    #[error("the `{0}` dependency cannot be assigned to this field")]
    UnsupportedDependency(String),

    #[error("parameters `{declared}` and `{offered}` cannot be adapted")]
    UnsupportedParameterShape { declared: String, offered: String },
}
