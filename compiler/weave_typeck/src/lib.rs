//! Structural compatibility checking.
//!
//! Decides whether an offered concrete type satisfies the type a slot
//! declares. The outcome is three-valued:
//! - `Ok(true)`: compatible, wire directly;
//! - `Ok(false)`: incompatible but bridgeable, the caller should request
//!   an adapter;
//! - `Err(_)`: irreconcilable (missing field/method, arity mismatch,
//!   concrete-to-concrete mismatch) — no adapter can help.
//!
//! Arity is always checked before any positional shape comparison.

use thiserror::Error;
use weave_ir::{Field, Method, TypeKind, TypeSet};

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum CompatError {
    #[error("the `{0}` type was not found")]
    UnknownType(String),

    #[error("the `{field}` field of `{owner}` does not exist")]
    MissingField { owner: String, field: String },

    /// Concrete-to-concrete mismatch; never bridgeable, so a hard error
    /// rather than a `false`.
    #[error("the `{0}` type must be an interface to accept a differing concrete type")]
    NotAnInterface(String),

    #[error("the `{method}` method is missing in `{ty}`")]
    MissingMethod { ty: String, method: String },

    #[error("the number of input parameters differs for the `{method}` method")]
    InputArity { method: String },

    #[error("the number of output parameters differs for the `{method}` method")]
    OutputArity { method: String },
}

/// Find the slot's field on the declared owner type.
pub fn field_of<'t>(
    types: &'t TypeSet,
    owner_id: &str,
    slot: &str,
) -> Result<&'t Field, CompatError> {
    let owner = types
        .get(owner_id)
        .ok_or_else(|| CompatError::UnknownType(owner_id.to_string()))?;
    owner.field(slot).ok_or_else(|| CompatError::MissingField {
        owner: owner.id.clone(),
        field: slot.to_string(),
    })
}

/// Does `offered` structurally satisfy the type that `slot` on
/// `owner_id` declares?
pub fn is_compatible(
    types: &TypeSet,
    owner_id: &str,
    slot: &str,
    offered_id: &str,
) -> Result<bool, CompatError> {
    let field = field_of(types, owner_id, slot)?;
    let Some(declared) = types.get(&field.id) else {
        if field.is_any() {
            return Ok(true);
        }
        return Err(CompatError::UnknownType(field.id.clone()));
    };
    let offered = types
        .get(offered_id)
        .ok_or_else(|| CompatError::UnknownType(offered_id.to_string()))?;

    if declared.id == offered.id {
        return Ok(true);
    }
    if declared.kind != TypeKind::Interface {
        return Err(CompatError::NotAnInterface(declared.id.clone()));
    }

    for wanted in &declared.methods {
        let found = offered
            .method(&wanted.name)
            .ok_or_else(|| CompatError::MissingMethod {
                ty: offered.id.clone(),
                method: wanted.name.clone(),
            })?;
        if !signatures_match(&wanted.name, wanted, found)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Compare two method signatures after stripping synthetic receivers.
///
/// `Ok(false)` means the signatures differ in a bridgeable way (some
/// positional pair mismatches); arity differences are hard errors.
pub fn signatures_match(
    method: &str,
    declared: &Method,
    offered: &Method,
) -> Result<bool, CompatError> {
    let declared_ins = declared.logical_ins();
    let offered_ins = offered.logical_ins();
    if declared_ins.len() != offered_ins.len() {
        return Err(CompatError::InputArity {
            method: method.to_string(),
        });
    }
    if declared.out.len() != offered.out.len() {
        return Err(CompatError::OutputArity {
            method: method.to_string(),
        });
    }
    let ins_match = declared_ins
        .iter()
        .zip(offered_ins)
        .all(|(a, b)| a.same_shape(b));
    let outs_match = declared
        .out
        .iter()
        .zip(&offered.out)
        .all(|(a, b)| a.same_shape(b));
    Ok(ins_match && outs_match)
}
