//! Structural type descriptions supplied by the type oracle.
//!
//! The JSON field names match what the generated Go probe emits, which in
//! turn mirrors `reflect` (`Id`, `Kind`, `PkgPath`, ...). Nothing here is
//! mutated after resolution.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// The subset of Go's `reflect.Kind` the pipeline distinguishes.
///
/// Serde names match `reflect.Kind.String()`; anything the pipeline never
/// branches on collapses into `Other` (two `Other` values still compare by
/// their type ids, so no precision is lost for compatibility checks).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TypeKind {
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "int", alias = "int8", alias = "int16", alias = "int32", alias = "int64")]
    Int,
    #[serde(rename = "uint", alias = "uint8", alias = "uint16", alias = "uint32", alias = "uint64")]
    Uint,
    #[serde(rename = "float64", alias = "float32")]
    Float,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "struct")]
    Struct,
    #[serde(rename = "interface")]
    Interface,
    #[serde(rename = "ptr")]
    Pointer,
    #[serde(rename = "func")]
    Func,
    #[serde(rename = "slice")]
    Slice,
    #[serde(rename = "map")]
    Map,
    #[serde(other, rename = "other")]
    Other,
}

/// A field of a struct type, or one parameter/return of a method.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Field {
    /// Package-qualified identity of the field's type. Anonymous types
    /// (pointers, `interface{}`) report `"."`.
    pub id: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub field_name: String,
    #[serde(default)]
    pub pkg_path: String,
}

impl Field {
    /// The unconstrained "any" type: no identity, no package, interface or
    /// pointer kind.
    pub fn is_any(&self) -> bool {
        (self.id.is_empty() || self.id == ".")
            && self.pkg_path.is_empty()
            && self.type_name.is_empty()
            && matches!(self.kind, TypeKind::Interface | TypeKind::Pointer)
    }

    /// A synthetic receiver parameter: pointer kind with no identity.
    pub fn is_receiver(&self) -> bool {
        (self.id.is_empty() || self.id == ".") && self.kind == TypeKind::Pointer
    }

    /// Equality used for parameter comparison: kind and identity.
    pub fn same_shape(&self, other: &Field) -> bool {
        self.kind == other.kind && self.id == other.id
    }
}

/// A method signature with ordered input and output parameter lists.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub r#in: Vec<Field>,
    #[serde(default)]
    pub out: Vec<Field>,
}

impl Method {
    /// Input parameters with any leading synthetic receiver stripped.
    pub fn logical_ins(&self) -> &[Field] {
        match self.r#in.first() {
            Some(first) if first.is_receiver() => &self.r#in[1..],
            _ => &self.r#in,
        }
    }
}

/// Full structural description of one struct or interface type.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeInfo {
    pub id: String,
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub pkg_path: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl TypeInfo {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.field_name == name)
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Id-indexed, insertion-ordered collection of type descriptions.
#[derive(Clone, Default, Debug)]
pub struct TypeSet {
    infos: Vec<TypeInfo>,
    index: FxHashMap<String, usize>,
}

impl TypeSet {
    pub fn new() -> Self {
        TypeSet::default()
    }

    /// Add a description; the first one seen for an id wins.
    pub fn insert(&mut self, info: TypeInfo) {
        if !self.index.contains_key(&info.id) {
            self.index.insert(info.id.clone(), self.infos.len());
            self.infos.push(info);
        }
    }

    pub fn get(&self, id: &str) -> Option<&TypeInfo> {
        let id = id.strip_prefix('*').unwrap_or(id);
        self.index.get(id).map(|&i| &self.infos[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeInfo> {
        self.infos.iter()
    }
}

impl FromIterator<TypeInfo> for TypeSet {
    fn from_iter<I: IntoIterator<Item = TypeInfo>>(iter: I) -> Self {
        let mut set = TypeSet::new();
        for info in iter {
            set.insert(info);
        }
        set
    }
}
