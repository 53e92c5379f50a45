//! Weave IR - core data model for the wiring compiler.
//!
//! This crate contains the data structures shared by every stage of the
//! pipeline:
//! - `Item` / `ItemGraph` for the resolved construction graph
//! - `TypeInfo` / `TypeSet` for structural type descriptions
//! - `Manifest` for the declarative wiring table
//! - `ImportTable` for deterministic import aliasing in emitted code
//!
//! # Design Philosophy
//!
//! - **Flatten everything**: items live in an arena, dependencies are
//!   `ItemId(u32)` indices, no `Box<Item>` chains.
//! - **Immutable after resolution**: the resolver builds the graph and the
//!   type set once; later stages only read them.

mod imports;
mod item;
mod manifest;
mod names;
mod types;

pub use imports::ImportTable;
pub use item::{Item, ItemGraph, ItemId, ItemKind};
pub use manifest::{Manifest, APPS_SECTION};
pub use names::{title_case, ADAPTER_SUFFIX, CTOR_PREFIX, GROUP_SUFFIX, REF_SUFFIX};
pub use types::{Field, Method, TypeInfo, TypeKind, TypeSet};
