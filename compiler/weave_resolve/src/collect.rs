//! Fixpoint collection of structural type descriptions.

use rustc_hash::FxHashSet;
use tracing::debug;
use weave_ir::{Field, ItemGraph, ItemKind, TypeKind, TypeSet};
use weave_oracle::{TypeCandidate, TypeProvider};

use crate::ResolveError;

/// Query `provider` in waves until every struct/interface identifier
/// reachable from the graph's items, their fields, and their method
/// signatures has been described.
pub(crate) fn collect_types<P: TypeProvider>(
    provider: &P,
    graph: &ItemGraph,
) -> Result<TypeSet, ResolveError> {
    let mut seen = FxHashSet::default();
    let mut batch = Vec::new();

    // Struct items seed the candidate set; group and reference markers are
    // already gone from the normalized type identity.
    for (_, item) in graph.iter() {
        if item.kind != ItemKind::Struct {
            continue;
        }
        let id = item.type_id();
        if seen.insert(id.clone()) {
            batch.push(TypeCandidate {
                id,
                kind: TypeKind::Struct,
                name: item.name.clone(),
                pkg_path: item.import_path(),
            });
        }
    }

    let mut types = TypeSet::new();
    let mut wave = 0usize;
    while !batch.is_empty() {
        wave += 1;
        debug!(wave, candidates = batch.len(), "querying type provider");
        let infos = provider.resolve_types(&batch)?;

        batch.clear();
        for info in &infos {
            for f in &info.fields {
                push_candidate(f, &mut seen, &mut batch);
            }
            for m in &info.methods {
                for f in m.r#in.iter().chain(m.out.iter()) {
                    push_candidate(f, &mut seen, &mut batch);
                }
            }
        }
        for info in infos {
            types.insert(info);
        }
    }
    Ok(types)
}

fn push_candidate(f: &Field, seen: &mut FxHashSet<String>, batch: &mut Vec<TypeCandidate>) {
    // Only named struct and interface types can be introspected further.
    if !matches!(f.kind, TypeKind::Struct | TypeKind::Interface)
        || f.id.is_empty()
        || f.id == "."
        || f.pkg_path.is_empty()
    {
        return;
    }
    if seen.insert(f.id.clone()) {
        batch.push(TypeCandidate {
            id: f.id.clone(),
            kind: f.kind,
            name: f.type_name.clone(),
            pkg_path: f.pkg_path.clone(),
        });
    }
}
