//! Adapter synthesis.
//!
//! When a struct dependency is bridgeable but not directly compatible,
//! a wrapper type is synthesized that embeds the offered type and forwards
//! only the mismatched methods, reconciling interface-typed parameters
//! with downcasts. The downcast is a runtime contract of the generated
//! program, not a compile-time guarantee.

use rustc_hash::FxHashSet;
use weave_ir::{
    title_case, Field, ImportTable, Item, Method, TypeInfo, TypeKind, TypeSet, ADAPTER_SUFFIX,
    CTOR_PREFIX, GROUP_SUFFIX, REF_SUFFIX,
};
use weave_typeck::{field_of, signatures_match, CompatError};

use crate::ctor::qualified;
use crate::CodegenError;

/// Synthesized adapter definitions for one generation pass.
///
/// Constructors are memoized per (declared type, offered type, group,
/// reference form); the wrapper type and its forwarding methods are
/// emitted once and shared between the value- and reference-form
/// constructors of the same triple.
#[derive(Default, Debug)]
pub struct AdapterRegistry {
    types_emitted: FxHashSet<String>,
    ctors: FxHashSet<String>,
    code: Vec<String>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        AdapterRegistry::default()
    }

    /// All synthesized definitions, in first-request order.
    pub fn definitions(&self) -> String {
        self.code.concat()
    }

    /// Synthesize (or reuse) the adapter bridging `offered` into the
    /// `slot` field of `owner_id`; returns its constructor name.
    pub fn adapt(
        &mut self,
        types: &TypeSet,
        imports: &mut ImportTable,
        owner_id: &str,
        slot: &str,
        offered: &Item,
    ) -> Result<String, CodegenError> {
        let field = field_of(types, owner_id, slot)?;
        let declared = types
            .get(&field.id)
            .ok_or_else(|| CompatError::UnknownType(field.id.clone()))?;
        let offered_info = types
            .get(&offered.type_id())
            .ok_or_else(|| CompatError::UnknownType(offered.type_id()))?;

        let mut name = format!(
            "{}{}{}{}",
            pkg_title(&offered_info.pkg_path),
            offered_info.name,
            pkg_title(&declared.pkg_path),
            declared.name
        );
        if let Some(group) = &offered.group {
            name.push_str(group);
            name.push_str(GROUP_SUFFIX);
        }
        name.push_str(ADAPTER_SUFFIX);
        let name = name.replace('-', "_");

        let mut ctor = format!("{CTOR_PREFIX}{name}");
        if offered.is_ref {
            ctor.push_str(REF_SUFFIX);
        }
        if !self.ctors.insert(ctor.clone()) {
            return Ok(ctor);
        }

        let mut code = String::new();
        if self.types_emitted.insert(name.clone()) {
            let embed_alias = imports.alias(&offered_info.pkg_path);
            code.push_str(&format!(
                "type {name} struct {{\n\t{}\n}}\n\n",
                qualified(&embed_alias, &offered_info.name)
            ));
            for wanted in &declared.methods {
                let found = offered_info.method(&wanted.name).ok_or_else(|| {
                    CompatError::MissingMethod {
                        ty: offered_info.id.clone(),
                        method: wanted.name.clone(),
                    }
                })?;
                if signatures_match(&wanted.name, wanted, found)? {
                    // Inherited through the embedding; nothing to forward.
                    continue;
                }
                code.push_str(&forwarding_method(
                    imports,
                    &name,
                    &offered_info.name,
                    wanted,
                    found,
                )?);
            }
        }
        code.push_str(&use_function(&name, &ctor, offered, offered_info));

        self.code.push(code);
        Ok(ctor)
    }
}

/// One forwarding method: the declared signature on the outside, the
/// embedded type's signature on the inside, downcasts in between.
fn forwarding_method(
    imports: &mut ImportTable,
    adapter: &str,
    embed: &str,
    declared: &Method,
    offered: &Method,
) -> Result<String, CodegenError> {
    let declared_ins = declared.logical_ins();
    let offered_ins = offered.logical_ins();

    let mut code = format!("func (o *{adapter}) {}(", declared.name);
    let params: Vec<String> = declared_ins
        .iter()
        .enumerate()
        .map(|(i, f)| format!("a{} {}", i + 1, type_ref(imports, f)))
        .collect();
    code.push_str(&params.join(", "));
    code.push(')');
    if !declared.out.is_empty() {
        let outs: Vec<String> = declared
            .out
            .iter()
            .enumerate()
            .map(|(i, f)| format!("r{} {}", i + 1, type_ref(imports, f)))
            .collect();
        code.push_str(&format!(" ({})", outs.join(", ")));
    }
    code.push_str(" {\n");

    let mut args = Vec::new();
    for (i, (want, have)) in declared_ins.iter().zip(offered_ins).enumerate() {
        let n = i + 1;
        if want.same_shape(have) {
            args.push(format!("a{n}"));
        } else if want.kind == TypeKind::Interface && have.kind == TypeKind::Interface {
            code.push_str(&format!("\tb{n} := a{n}.({})\n", type_ref(imports, have)));
            args.push(format!("b{n}"));
        } else {
            return Err(shape_error(want, have));
        }
    }
    let call = format!("o.{embed}.{}({})", declared.name, args.join(", "));

    if declared.out.is_empty() && offered.out.is_empty() {
        code.push_str(&format!("\t{call}\n"));
    } else if outs_equal(declared, offered) {
        code.push_str(&format!("\treturn {call}\n"));
    } else {
        // Mixed results: matching outputs land in the named returns
        // directly, mismatched ones go through a temporary and a cast.
        let mut lhs = Vec::new();
        let mut casts = String::new();
        for (i, (want, have)) in declared.out.iter().zip(&offered.out).enumerate() {
            let n = i + 1;
            if want.same_shape(have) {
                lhs.push(format!("r{n}"));
            } else if want.kind == TypeKind::Interface && have.kind == TypeKind::Interface {
                lhs.push(format!("v{n}"));
                casts.push_str(&format!("\tr{n} = v{n}.({})\n", type_ref(imports, want)));
            } else {
                return Err(shape_error(want, have));
            }
        }
        code.push_str(&format!("\t{} := {call}\n", lhs.join(", ")));
        code.push_str(&casts);
        code.push_str("\treturn\n");
    }
    code.push_str("}\n\n");
    Ok(code)
}

/// The adapter's own constructor: zero value, embedded value built via the
/// offered item's constructor, return. The adapter is always handed out
/// by pointer; a value would not carry the pointer-receiver forwarding
/// methods in its method set.
fn use_function(name: &str, ctor: &str, offered: &Item, info: &TypeInfo) -> String {
    let mut code = format!("func {ctor}() *{name} {{\n\tv := &{name}{{}}\n");
    let embed = if offered.is_ref {
        format!("*{}()", offered.constructor_name(true))
    } else {
        format!("{}()", offered.constructor_name(false))
    };
    code.push_str(&format!("\tv.{} = {embed}\n", info.name));
    code.push_str("\treturn v\n}\n\n");
    code
}

fn outs_equal(declared: &Method, offered: &Method) -> bool {
    declared
        .out
        .iter()
        .zip(&offered.out)
        .all(|(a, b)| a.same_shape(b))
}

fn type_ref(imports: &mut ImportTable, f: &Field) -> String {
    let alias = imports.alias(&f.pkg_path);
    qualified(&alias, &f.type_name)
}

fn pkg_title(pkg_path: &str) -> String {
    title_case(pkg_path.rsplit('/').next().unwrap_or_default())
}

fn shape_error(want: &Field, have: &Field) -> CodegenError {
    CodegenError::UnsupportedParameterShape {
        declared: want.type_name.clone(),
        offered: have.type_name.clone(),
    }
}
