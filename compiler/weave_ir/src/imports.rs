//! Deterministic import aliasing for the emitted unit.

use rustc_hash::FxHashMap;

/// Insertion-ordered registry of import paths and their aliases.
///
/// Aliases are `p1`, `p2`, ... in first-seen order, so repeated generations
/// of the same graph produce identical import sections. Standard-library
/// imports registered with [`ImportTable::insert_plain`] keep no alias.
#[derive(Clone, Default, Debug)]
pub struct ImportTable {
    entries: Vec<(String, String)>,
    index: FxHashMap<String, usize>,
}

impl ImportTable {
    pub fn new() -> Self {
        ImportTable::default()
    }

    /// Register `path` and return its alias. Empty and relative paths are
    /// not importable and yield an empty alias.
    pub fn alias(&mut self, path: &str) -> String {
        if path.is_empty() || path.starts_with('.') {
            return String::new();
        }
        if let Some(&i) = self.index.get(path) {
            return self.entries[i].1.clone();
        }
        let alias = format!("p{}", self.index.len() + 1);
        self.index.insert(path.to_string(), self.entries.len());
        self.entries.push((path.to_string(), alias.clone()));
        alias
    }

    /// Register an unaliased import, e.g. `fmt`.
    pub fn insert_plain(&mut self, path: &str) {
        if path.is_empty() || self.index.contains_key(path) {
            return;
        }
        self.index.insert(path.to_string(), self.entries.len());
        self.entries.push((path.to_string(), String::new()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(path, alias)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, a)| (p.as_str(), a.as_str()))
    }
}
