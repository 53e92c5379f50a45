//! Dependency resolver.
//!
//! Expands an entry spec into the complete construction graph using the
//! wiring manifest and the spec parser, then drives the type provider to
//! collect structural descriptions for every type transitively reachable
//! from the graph.
//!
//! Expansion is memoized per spec identifier, so an identifier is parsed
//! and expanded at most once per resolution pass. The key is the full
//! trimmed spec, so a group-, reference- or exec-qualified entry and its
//! plain counterpart stay independent items; only the type identity sent
//! to the oracle strips the markers. Self-referential wiring is rejected
//! with [`ResolveError::Cycle`] instead of diverging.

mod collect;
mod error;

pub use error::ResolveError;

use rustc_hash::FxHashSet;
use tracing::debug;
use weave_ir::{Item, ItemGraph, ItemId, ItemKind, Manifest, TypeSet};
use weave_oracle::TypeProvider;
use weave_parse::{split_call_args, SpecParser};

/// A resolved construction graph with its collected type descriptions.
#[derive(Debug)]
pub struct Resolution {
    pub graph: ItemGraph,
    pub types: TypeSet,
}

/// Resolves entry specs against one manifest and one type provider.
///
/// Holds no per-call mutable state; safe to reuse across independent
/// generation requests.
pub struct Resolver<'a, P: TypeProvider> {
    parser: SpecParser,
    manifest: &'a Manifest,
    provider: &'a P,
}

impl<'a, P: TypeProvider> Resolver<'a, P> {
    pub fn new(manifest: &'a Manifest, provider: &'a P) -> Self {
        Resolver {
            parser: SpecParser::new(),
            manifest,
            provider,
        }
    }

    /// Resolve the named application's entry spec.
    pub fn resolve_application(&self, application: &str) -> Result<Resolution, ResolveError> {
        if application.is_empty() {
            return Err(ResolveError::UnnamedApplication);
        }
        let entry = self
            .manifest
            .entry_spec(application)
            .ok_or_else(|| ResolveError::MissingApplication(application.to_string()))?;
        self.resolve(entry)
    }

    /// Expand `entry_spec` into a full graph and collect its types.
    pub fn resolve(&self, entry_spec: &str) -> Result<Resolution, ResolveError> {
        let mut expansion = Expansion::default();
        let entry = self.expand(entry_spec, &mut expansion)?;
        let mut graph = expansion.graph;
        graph.set_entry(entry);
        debug!(items = graph.len(), "construction graph expanded");

        let types = collect::collect_types(self.provider, &graph)?;

        // Every struct item must be described before code generation.
        for (_, item) in graph.iter() {
            if item.kind == ItemKind::Struct && !types.contains(&item.type_id()) {
                return Err(ResolveError::MissingType(item.type_id()));
            }
        }
        Ok(Resolution { graph, types })
    }

    fn expand(&self, spec: &str, st: &mut Expansion) -> Result<ItemId, ResolveError> {
        let key = spec.trim().to_string();
        if let Some(id) = st.graph.lookup(&key) {
            return Ok(id);
        }
        if !st.in_flight.insert(key.clone()) {
            return Err(ResolveError::Cycle(key));
        }

        let mut item = self.parser.parse(&key)?;
        self.expand_slots(&key, &mut item, st)?;
        if item.kind == ItemKind::Func {
            self.expand_call_args(&mut item, st)?;
        }

        st.in_flight.remove(&key);
        Ok(st.graph.insert(key, item))
    }

    /// Attach the item's declared slots from the wiring table.
    fn expand_slots(
        &self,
        key: &str,
        item: &mut Item,
        st: &mut Expansion,
    ) -> Result<(), ResolveError> {
        let Some(slots) = self.manifest.section(key) else {
            return Ok(());
        };
        for (slot, dep_spec) in slots {
            let dep = self.expand(dep_spec, st)?;
            item.deps.push((slot.clone(), dep));
        }
        Ok(())
    }

    /// Resolve each positional call argument as an anonymous dependency
    /// keyed `"0"`, `"1"`, ...
    fn expand_call_args(&self, item: &mut Item, st: &mut Expansion) -> Result<(), ResolveError> {
        for (index, arg) in split_call_args(&item.original)?.into_iter().enumerate() {
            let dep = self.expand(&arg, st)?;
            item.deps.push((index.to_string(), dep));
        }
        Ok(())
    }
}

#[derive(Default)]
struct Expansion {
    graph: ItemGraph,
    in_flight: FxHashSet<String>,
}
