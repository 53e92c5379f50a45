//! Per-item constructor emission.

use weave_ir::{ImportTable, Item, ItemGraph, ItemKind, TypeKind, TypeSet};
use weave_typeck::{field_of, is_compatible};

use crate::adapter::AdapterRegistry;
use crate::CodegenError;

/// Emit the constructor function for one struct item: header, zero value,
/// one assignment per slot, return.
pub(crate) fn constructor(
    graph: &ItemGraph,
    types: &TypeSet,
    imports: &mut ImportTable,
    adapters: &mut AdapterRegistry,
    item: &Item,
) -> Result<String, CodegenError> {
    let alias = imports.alias(&item.import_path());
    let type_name = qualified(&alias, &item.name);

    let mut code = if item.is_ref {
        format!(
            "func {}() *{type_name} {{\n\tv := &{type_name}{{}}\n",
            item.constructor_name(true)
        )
    } else {
        format!(
            "func {}() {type_name} {{\n\tv := {type_name}{{}}\n",
            item.constructor_name(false)
        )
    };

    // Slots in lexicographic order, so repeated generations emit the
    // assignments identically.
    let mut deps: Vec<_> = item.deps.iter().collect();
    deps.sort_by(|a, b| a.0.cmp(&b.0));

    let owner_id = item.type_id();
    for (slot, dep_id) in deps {
        let dep = graph.get(*dep_id);
        match dep.kind {
            ItemKind::Func => {
                let field = field_of(types, &owner_id, slot)?;
                let dep_alias = imports.alias(&dep.import_path());
                match field.kind {
                    // A function-valued field takes the reference as is,
                    // unless the spec asked for an invocation.
                    TypeKind::Func if !dep.exec => {
                        code.push_str(&assign(slot, &qualified(&dep_alias, &dep.name)));
                    }
                    TypeKind::Func | TypeKind::Struct | TypeKind::Interface => {
                        let call = call_expr(graph, dep);
                        code.push_str(&assign(slot, &qualified(&dep_alias, &call)));
                    }
                    _ => return Err(CodegenError::UnsupportedDependency(dep.original.clone())),
                }
            }
            ItemKind::Struct => {
                let compatible = is_compatible(types, &owner_id, slot, &dep.type_id())?;
                let ctor = if compatible {
                    dep.constructor_name(dep.is_ref)
                } else {
                    adapters.adapt(types, imports, &owner_id, slot, dep)?
                };
                code.push_str(&assign(slot, &format!("{ctor}()")));
            }
            ItemKind::String | ItemKind::Number | ItemKind::Boolean => {
                code.push_str(&assign(slot, &dep.name));
            }
        }
    }
    code.push_str("\treturn v\n}\n\n");
    Ok(code)
}

fn assign(slot: &str, value: &str) -> String {
    format!("\tv.{slot} = {value}\n")
}

pub(crate) fn qualified(alias: &str, name: &str) -> String {
    if alias.is_empty() {
        name.to_string()
    } else {
        format!("{alias}.{name}")
    }
}

/// Render a call expression for a func item: struct arguments become
/// constructor calls, func arguments pass through as bare names, literals
/// keep their spelling.
pub(crate) fn call_expr(graph: &ItemGraph, item: &Item) -> String {
    let args: Vec<String> = item
        .deps
        .iter()
        .map(|(_, dep_id)| {
            let dep = graph.get(*dep_id);
            match dep.kind {
                ItemKind::Struct => format!("{}()", dep.constructor_name(dep.is_ref)),
                _ => dep.name.clone(),
            }
        })
        .collect();
    format!("{}({})", item.name, args.join(", "))
}
