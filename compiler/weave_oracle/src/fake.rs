//! Deterministic in-memory provider for tests.

use std::cell::Cell;

use weave_ir::TypeInfo;

use crate::{OracleError, TypeCandidate, TypeProvider};

/// Serves pre-baked type descriptions by id. Candidates without a match
/// are silently skipped, mirroring how the real probe only reports what
/// the target codebase defines.
#[derive(Clone, Default, Debug)]
pub struct StaticProvider {
    infos: Vec<TypeInfo>,
    calls: Cell<usize>,
}

impl StaticProvider {
    pub fn new(infos: Vec<TypeInfo>) -> Self {
        StaticProvider {
            infos,
            calls: Cell::new(0),
        }
    }

    /// Number of `resolve_types` calls served, for asserting wave counts.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl TypeProvider for StaticProvider {
    fn resolve_types(&self, candidates: &[TypeCandidate]) -> Result<Vec<TypeInfo>, OracleError> {
        self.calls.set(self.calls.get() + 1);
        Ok(candidates
            .iter()
            .filter_map(|c| self.infos.iter().find(|i| i.id == c.id).cloned())
            .collect())
    }
}
