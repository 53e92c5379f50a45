//! Source emission.
//!
//! Walks a resolved construction graph and emits one self-contained Go
//! wiring unit: `package main`, the import section, the `Execute`
//! bootstrap, one constructor per struct item, and any synthesized
//! adapters, in that order. Output is deterministic for a given graph:
//! import aliases follow first use, constructors follow the entry walk,
//! slots are assigned in lexicographic order.

mod adapter;
mod ctor;
mod error;

pub use adapter::AdapterRegistry;
pub use error::CodegenError;

use rustc_hash::FxHashSet;
use weave_ir::{ImportTable, Item, ItemGraph, ItemId, ItemKind, TypeSet};

/// Generate the full wiring unit for a resolved graph.
pub fn generate_unit(graph: &ItemGraph, types: &TypeSet) -> Result<String, CodegenError> {
    let entry = graph.entry().ok_or(CodegenError::MissingEntry)?;
    let mut imports = ImportTable::new();
    let mut adapters = AdapterRegistry::new();

    let mut structs = Vec::new();
    let mut seen = FxHashSet::default();
    collect_structs(graph, entry, &mut seen, &mut structs);

    let mut ctors = String::new();
    for id in structs {
        let item = graph.get(id);
        ctors.push_str(&ctor::constructor(
            graph,
            types,
            &mut imports,
            &mut adapters,
            item,
        )?);
    }
    let bootstrap = execute_block(graph, &mut imports, graph.get(entry));

    let mut unit = String::from("package main\n\n");
    if !imports.is_empty() {
        unit.push_str("import (\n");
        for (path, alias) in imports.iter() {
            if alias.is_empty() {
                unit.push_str(&format!("\t\"{path}\"\n"));
            } else {
                unit.push_str(&format!("\t{alias} \"{path}\"\n"));
            }
        }
        unit.push_str(")\n\n");
    }
    unit.push_str(&bootstrap);
    unit.push_str(&ctors);
    unit.push_str(&adapters.definitions());
    Ok(unit)
}

/// Struct items reachable from the entry, in preorder. The walk follows
/// struct dependencies transitively and steps through func dependencies
/// into their struct-kind arguments only.
fn collect_structs(
    graph: &ItemGraph,
    id: ItemId,
    seen: &mut FxHashSet<ItemId>,
    out: &mut Vec<ItemId>,
) {
    if !seen.insert(id) {
        return;
    }
    let item = graph.get(id);
    if item.kind == ItemKind::Struct {
        out.push(id);
    }
    for (_, dep_id) in &item.deps {
        match graph.get(*dep_id).kind {
            ItemKind::Struct => collect_structs(graph, *dep_id, seen, out),
            ItemKind::Func => {
                for (_, arg_id) in &graph.get(*dep_id).deps {
                    if graph.get(*arg_id).kind == ItemKind::Struct {
                        collect_structs(graph, *arg_id, seen, out);
                    }
                }
            }
            _ => {}
        }
    }
}

/// The bootstrap function, dispatching on the entry item's kind.
fn execute_block(graph: &ItemGraph, imports: &mut ImportTable, entry: &Item) -> String {
    let mut code = String::from("func Execute() {\n");
    match entry.kind {
        ItemKind::Func => {
            let alias = imports.alias(&entry.import_path());
            let call = ctor::call_expr(graph, entry);
            code.push_str(&format!("\t{}\n", ctor::qualified(&alias, &call)));
        }
        ItemKind::Struct => {
            code.push_str(&format!(
                "\tapp := {}()\n",
                entry.constructor_name(entry.is_ref)
            ));
            code.push_str("\tapp.Execute()\n");
        }
        ItemKind::String | ItemKind::Number | ItemKind::Boolean => {
            imports.insert_plain("fmt");
            code.push_str(&format!("\tfmt.Println({})\n", entry.name));
        }
    }
    code.push_str("}\n\n");
    code
}
