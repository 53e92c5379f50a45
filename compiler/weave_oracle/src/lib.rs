//! Type oracle boundary.
//!
//! The resolver needs full structural descriptions (fields, methods,
//! signatures) of every type reachable from the construction graph. That
//! introspection happens outside this process: the production provider
//! compiles and runs a reflection probe against the target Go codebase in
//! an isolated scratch workspace. Tests use [`StaticProvider`], a
//! deterministic in-memory fake.
//!
//! Providers must behave as pure functions of their candidate set for a
//! given target codebase; each call uses a single-use workspace so
//! overlapping requests never share intermediate artifacts.

mod error;
mod fake;
mod probe;
mod toolchain;

pub use error::OracleError;
pub use fake::StaticProvider;
pub use toolchain::GoToolchain;

use serde::{Deserialize, Serialize};
use weave_ir::{TypeInfo, TypeKind};

/// A type the resolver wants described.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeCandidate {
    /// Package-qualified identity (`<pkgPath>.<name>`).
    pub id: String,
    pub kind: TypeKind,
    pub name: String,
    pub pkg_path: String,
}

/// Supplies structural type descriptions for candidate identifiers.
///
/// Implementations only describe struct and interface types; candidates of
/// other kinds are ignored.
pub trait TypeProvider {
    fn resolve_types(&self, candidates: &[TypeCandidate]) -> Result<Vec<TypeInfo>, OracleError>;
}
