//! Items and the resolved construction graph.

use rustc_hash::FxHashMap;

use crate::names::{title_case, CTOR_PREFIX, GROUP_SUFFIX, REF_SUFFIX};

/// Classification of a wiring spec.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ItemKind {
    /// A constructible type, e.g. `github.com/acme/app/cfg.Config`.
    Struct,
    /// A function reference or call, e.g. `pkg.New("x")`.
    Func,
    /// A quoted string literal.
    String,
    /// A numeric literal (anything parseable as a float).
    Number,
    /// `true` or `false`.
    Boolean,
}

/// One node of the construction graph.
///
/// Created once per distinct identifier during resolution and immutable
/// afterwards. Dependencies are `(slot name, ItemId)` pairs in declaration
/// order; for `Func` items the positional call arguments follow under the
/// keys `"0"`, `"1"`, ...
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Item {
    pub kind: ItemKind,
    /// Type or function name (`Config`), or the literal text for literals.
    pub name: String,
    /// Package alias, the last path segment before the name (`cfg`).
    pub pkg: String,
    /// Directory prefix including the trailing separator
    /// (`github.com/acme/app/`), empty for local or literal items.
    pub path: String,
    /// Namespace qualifier from a `[Name]` prefix.
    pub group: Option<String>,
    /// Pointer semantics requested with a leading `*`.
    pub is_ref: bool,
    /// Invoke-on-use marker from a leading `.`.
    pub exec: bool,
    /// The raw spec text this item was parsed from.
    pub original: String,
    pub deps: Vec<(String, ItemId)>,
}

impl Item {
    /// Package-qualified type identity, matching what the type oracle
    /// reports (`<pkgPath>.<name>`). Group and reference markers never
    /// appear here.
    pub fn type_id(&self) -> String {
        format!("{}.{}", self.import_path(), self.name)
    }

    /// Full import path of the item's package.
    pub fn import_path(&self) -> String {
        format!("{}{}", self.path, self.pkg)
    }

    /// Deterministic name of the generated constructor for this item.
    ///
    /// `with_ref` selects the pointer-returning variant.
    pub fn constructor_name(&self, with_ref: bool) -> String {
        let mut name = String::from(CTOR_PREFIX);
        if let Some(group) = &self.group {
            name.push_str(group);
            name.push_str(GROUP_SUFFIX);
        }
        name.push_str(&title_case(&self.pkg));
        name.push_str(&self.name);
        let mut name = name.replace('-', "_");
        if with_ref {
            name.push_str(REF_SUFFIX);
        }
        name
    }
}

/// Index of an item in its graph.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ItemId(u32);

/// Arena of resolved items, keyed by their memoized spec identifier.
#[derive(Clone, Default, Debug)]
pub struct ItemGraph {
    items: Vec<Item>,
    index: FxHashMap<String, ItemId>,
    entry: Option<ItemId>,
}

impl ItemGraph {
    pub fn new() -> Self {
        ItemGraph::default()
    }

    pub fn get(&self, id: ItemId) -> &Item {
        &self.items[id.0 as usize]
    }

    /// Look up an already-resolved item by its memoization key.
    pub fn lookup(&self, key: &str) -> Option<ItemId> {
        self.index.get(key).copied()
    }

    /// Add a resolved item under `key`. The key must not be present yet.
    pub fn insert(&mut self, key: String, item: Item) -> ItemId {
        let id = ItemId(self.items.len() as u32);
        self.items.push(item);
        self.index.insert(key, id);
        id
    }

    pub fn set_entry(&mut self, id: ItemId) {
        self.entry = Some(id);
    }

    /// The entry item the graph was resolved from.
    pub fn entry(&self) -> Option<ItemId> {
        self.entry
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (ItemId(i as u32), item))
    }
}
